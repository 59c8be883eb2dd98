use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Record, parse_value, unknown_field};
use crate::error::{HotelbookError, Result};

/// A hotel customer. Contact and payment fields are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: u64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub credit_card: String,
}

impl Customer {
    pub fn new(
        customer_id: u64,
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        credit_card: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            credit_card: credit_card.into(),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Phone: {} | Address: {} | Credit Card: {}",
            self.customer_id, self.name, self.phone, self.address, self.credit_card
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    CustomerId,
    Name,
    Phone,
    Address,
    CreditCard,
}

impl CustomerField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomerId => "customer_id",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::CreditCard => "credit_card",
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerField {
    type Err = HotelbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "customer_id" => Ok(Self::CustomerId),
            "name" => Ok(Self::Name),
            "phone" => Ok(Self::Phone),
            "address" => Ok(Self::Address),
            "credit_card" => Ok(Self::CreditCard),
            other => Err(unknown_field(Customer::ENTITY, other)),
        }
    }
}

impl Record for Customer {
    type Field = CustomerField;

    const ENTITY: &'static str = "customer";
    const FIELDS: &'static [&'static str] =
        &["customer_id", "name", "phone", "address", "credit_card"];

    fn id(&self) -> u64 {
        self.customer_id
    }

    fn get(&self, field: CustomerField) -> String {
        match field {
            CustomerField::CustomerId => self.customer_id.to_string(),
            CustomerField::Name => self.name.clone(),
            CustomerField::Phone => self.phone.clone(),
            CustomerField::Address => self.address.clone(),
            CustomerField::CreditCard => self.credit_card.clone(),
        }
    }

    fn set(&mut self, field: CustomerField, value: &str) -> Result<()> {
        match field {
            CustomerField::CustomerId => self.customer_id = parse_value(field, value)?,
            CustomerField::Name => self.name = value.to_string(),
            CustomerField::Phone => self.phone = value.to_string(),
            CustomerField::Address => self.address = value.to_string(),
            CustomerField::CreditCard => self.credit_card = value.to_string(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Customer {
        Customer::new(
            1,
            "Emiliano Zapata",
            "5535698789",
            "Bosque de Chapultepec 1550, CDMX",
            "5698-5621-5532-4742",
        )
    }

    #[test]
    fn test_field_names_roundtrip() {
        for name in Customer::FIELDS {
            let field: CustomerField = name.parse().unwrap();
            assert_eq!(field.as_str(), *name);
        }
        assert!("email".parse::<CustomerField>().is_err());
    }

    #[test]
    fn test_set_text_and_id() {
        let mut c = sample();
        c.set(CustomerField::Name, "Emiliano Zapata Salazar").unwrap();
        c.set(CustomerField::CustomerId, "7").unwrap();
        assert_eq!(c.name, "Emiliano Zapata Salazar");
        assert_eq!(c.id(), 7);
        assert!(c.set(CustomerField::CustomerId, "seven").is_err());
    }

    #[test]
    fn test_display_line() {
        let line = sample().to_string();
        assert!(line.starts_with("ID: 1 | Name: Emiliano Zapata"));
        assert!(line.ends_with("Credit Card: 5698-5621-5532-4742"));
    }

    #[test]
    fn test_json_keys_in_declaration_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let pos = |k: &str| json.find(&format!("\"{k}\"")).unwrap();
        assert!(pos("customer_id") < pos("name"));
        assert!(pos("address") < pos("credit_card"));
    }
}
