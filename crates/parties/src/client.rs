use serde::{Deserialize, Serialize};

use stonedesk_core::{ClientId, DomainResult, Entity, ValueObject, Validator};

use crate::cnpj::{format_cnpj, validate_cnpj};

/// Contact person at a client company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ValueObject for Contact {}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    /// Two-letter state code, e.g. `ES`.
    pub state: String,
    pub zip_code: String,
}

impl ValueObject for Address {}

/// A client company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub company_name: String,
    /// Stored formatted, `XX.XXX.XXX/XXXX-XX`.
    pub cnpj: String,
    pub contact: Contact,
    pub address: Address,
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Client form input (create or full replace).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub company_name: String,
    pub cnpj: String,
    pub contact: Contact,
    pub address: Address,
}

impl NewClient {
    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        v.min_chars("company_name", &self.company_name, 3)
            .check(validate_cnpj(&self.cnpj), "cnpj", "must be a valid CNPJ")
            .required("contact.name", &self.contact.name)
            .check(
                self.contact.email.contains('@'),
                "contact.email",
                "must be a valid email address",
            )
            .required("contact.phone", &self.contact.phone)
            .required("address.street", &self.address.street)
            .required("address.city", &self.address.city)
            .check(
                self.address.state.trim().chars().count() == 2,
                "address.state",
                "must be a two-letter state code",
            )
            .required("address.zip_code", &self.address.zip_code);
        v.finish()
    }

    pub fn into_client(self, id: ClientId) -> DomainResult<Client> {
        self.validate()?;

        let cnpj = format_cnpj(&self.cnpj).unwrap_or(self.cnpj);
        Ok(Client {
            id,
            company_name: self.company_name.trim().to_string(),
            cnpj,
            contact: Contact {
                name: self.contact.name.trim().to_string(),
                email: self.contact.email.trim().to_string(),
                phone: self.contact.phone.trim().to_string(),
            },
            address: Address {
                state: self.address.state.trim().to_ascii_uppercase(),
                ..self.address
            },
        })
    }
}

/// Client list filter. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientFilter {
    /// Case-insensitive substring of company name or contact name.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl ClientFilter {
    pub fn matches(&self, c: &Client) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|q| {
            let q = q.trim().to_lowercase();
            c.company_name.to_lowercase().contains(&q) || c.contact.name.to_lowercase().contains(&q)
        });

        search_ok
            && self
                .city
                .as_deref()
                .is_none_or(|city| city.trim().eq_ignore_ascii_case(&c.address.city))
            && self
                .state
                .as_deref()
                .is_none_or(|state| state.trim().eq_ignore_ascii_case(&c.address.state))
    }
}
