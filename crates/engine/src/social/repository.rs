//! Person registry.
//!
//! Every person created here is linked from the store's reference node by a
//! PERSON edge. Names are unique across the registry.

use socnet_core::{Direction, EdgeKind, NodeId, SocnetError, SocnetResult, Value};
use socnet_storage::{GraphRead, GraphStore, GraphWrite};

use super::person::Person;
use super::schema::{read_string, validate_name, PERSON_NAME};
use super::status::{current_status, previous_status};
use super::SocialGraph;

fn find_by_name<R: GraphRead + ?Sized>(reader: &R, name: &str) -> SocnetResult<Option<NodeId>> {
    let root = reader.reference_node();
    for edge in reader.edges_of(root, EdgeKind::Person, Direction::Outgoing)? {
        if read_string(reader, edge.dst, PERSON_NAME)? == name {
            return Ok(Some(edge.dst));
        }
    }
    Ok(None)
}

impl<S: GraphStore> SocialGraph<S> {
    /// Register a new person.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty or over-long name, `DuplicatePerson` if
    /// the name is taken.
    pub fn create_person(&self, name: &str) -> SocnetResult<Person<S>> {
        validate_name(name, self.config().max_name_len)?;
        let node = self.store().run_atomic(|txn| {
            if find_by_name(&*txn, name)?.is_some() {
                return Err(SocnetError::DuplicatePerson(name.to_string()));
            }
            let root = txn.reference_node();
            let node = txn.create_node()?;
            txn.set_property(node, PERSON_NAME, Value::from(name))?;
            txn.create_edge(root, node, EdgeKind::Person)?;
            Ok(node)
        })?;
        tracing::info!(target: "socnet::social", person = %node, name, "person created");
        Ok(Person::new(self.clone(), node))
    }

    /// Look up a registered person by name.
    pub fn person_by_name(&self, name: &str) -> SocnetResult<Option<Person<S>>> {
        Ok(find_by_name(self.store().as_ref(), name)?.map(|node| Person::new(self.clone(), node)))
    }

    /// Every registered person, in registration order.
    pub fn persons(&self) -> SocnetResult<Vec<Person<S>>> {
        let store = self.store();
        let root = store.reference_node();
        Ok(store
            .edges_of(root, EdgeKind::Person, Direction::Outgoing)?
            .into_iter()
            .map(|edge| Person::new(self.clone(), edge.dst))
            .collect())
    }

    /// Number of registered persons.
    pub fn person_count(&self) -> SocnetResult<usize> {
        let store = self.store();
        Ok(store
            .edges_of(store.reference_node(), EdgeKind::Person, Direction::Outgoing)?
            .len())
    }

    /// Delete a person and their status history.
    ///
    /// Friendships and the registry link go with the person node.
    pub fn delete_person(&self, person: Person<S>) -> SocnetResult<()> {
        if !self.same_store(person.graph()) {
            return Err(SocnetError::invalid_input(format!(
                "{} belongs to a different store",
                person
            )));
        }
        let node = person.node();
        let statuses = self.store().run_atomic(|txn| {
            if !txn.contains_node(node) {
                return Err(SocnetError::NodeNotFound(node));
            }
            if node == txn.reference_node() {
                return Err(SocnetError::invalid_input("the reference node is not a person"));
            }
            let mut chain = Vec::new();
            let mut cursor = current_status(&*txn, node)?;
            while let Some(status) = cursor {
                chain.push(status);
                cursor = previous_status(&*txn, status)?;
            }
            for &status in &chain {
                txn.delete_node(status)?;
            }
            txn.delete_node(node)?;
            Ok(chain.len())
        })?;
        tracing::info!(target: "socnet::social", person = %node, statuses, "person deleted");
        Ok(())
    }
}
