use std::path::PathBuf;

use crate::error::Result;
use crate::models::{Customer, CustomerField};
use crate::storage::JsonStore;

use super::Repository;

pub trait CustomerRepository: Repository<Entity = Customer> {
    fn create(&self, customer: Customer) -> Result<()>;
    fn delete(&self, customer_id: u64) -> Result<bool>;
    fn edit(&self, customer_id: u64, field: CustomerField, value: &str) -> Result<bool>;
    fn display(&self, customer_id: u64) -> Result<Option<Customer>>;
    fn load(&self) -> Result<Vec<Customer>>;
}

pub struct JsonCustomerRepository {
    store: JsonStore<Customer>,
}

impl JsonCustomerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_store(JsonStore::new(path))
    }

    pub fn with_store(store: JsonStore<Customer>) -> Self {
        Self { store }
    }
}

impl Repository for JsonCustomerRepository {
    type Entity = Customer;

    fn store(&self) -> &JsonStore<Customer> {
        &self.store
    }
}

impl CustomerRepository for JsonCustomerRepository {
    fn create(&self, customer: Customer) -> Result<()> {
        self.insert(customer)
    }

    fn delete(&self, customer_id: u64) -> Result<bool> {
        Ok(self.remove_where(|c| c.customer_id == customer_id)? > 0)
    }

    fn edit(&self, customer_id: u64, field: CustomerField, value: &str) -> Result<bool> {
        self.update_field(customer_id, field, value)
    }

    fn display(&self, customer_id: u64) -> Result<Option<Customer>> {
        self.find_by_id(customer_id)
    }

    fn load(&self) -> Result<Vec<Customer>> {
        self.load_all()
    }
}
