// src/store/customer_store.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::models::customer::{Customer, CustomerInput, CustomerPatch};
use crate::store::json_store::JsonCollection;
use crate::store::seed;

pub struct CustomerStore {
    records: Vec<Customer>,
    collection: JsonCollection,
}

impl CustomerStore {
    pub fn open(collection: JsonCollection) -> Self {
        let records = collection.load_or_seed(seed::customers);
        Self { records, collection }
    }

    fn persist(&self) {
        self.collection.save(&self.records);
    }

    // --- CRUD ---

    pub fn add(&mut self, input: CustomerInput) -> Result<Customer, AppError> {
        input.validate()?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            tax_number: input.tax_number,
            created_at: now,
            updated_at: now,
        };

        self.records.push(customer.clone());
        self.persist();
        Ok(customer)
    }

    /// Atualização parcial; id inexistente é um no-op silencioso. Faturas já
    /// emitidas não são afetadas: elas guardam o nome do cliente como snapshot.
    pub fn update(&mut self, id: Uuid, patch: CustomerPatch) {
        let Some(customer) = self.records.iter_mut().find(|c| c.id == id) else {
            return;
        };

        if let Some(name) = patch.name {
            customer.name = name;
        }
        if let Some(email) = patch.email {
            customer.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            customer.phone = Some(phone);
        }
        if let Some(address) = patch.address {
            customer.address = Some(address);
        }
        if let Some(tax_number) = patch.tax_number {
            customer.tax_number = Some(tax_number);
        }
        customer.updated_at = Utc::now();

        self.persist();
    }

    /// Remoção sem cascata: faturas do cliente continuam válidas com o nome
    /// denormalizado; a busca pelo registro vivo passa a devolver `None`.
    pub fn remove(&mut self, id: Uuid) {
        self.records.retain(|c| c.id != id);
        self.persist();
    }

    // --- Consultas ---

    pub fn get(&self, id: Uuid) -> Option<&Customer> {
        self.records.iter().find(|c| c.id == id)
    }

    pub fn all(&self) -> &[Customer] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Busca por substring (sem distinção de caixa) em nome, e-mail e telefone.
    pub fn search(&self, term: &str) -> Vec<&Customer> {
        let term = term.to_lowercase();
        self.records
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&term)
                    || c.email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&term))
                    || c.phone
                        .as_deref()
                        .is_some_and(|phone| phone.to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn with_email(&self) -> Vec<&Customer> {
        self.records.iter().filter(|c| c.email.is_some()).collect()
    }

    pub fn with_phone(&self) -> Vec<&Customer> {
        self.records.iter().filter(|c| c.phone.is_some()).collect()
    }
}
