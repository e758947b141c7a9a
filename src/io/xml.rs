//! XML shape of the snapshot records
//!
//! The deserializer trims leading and trailing whitespace from element text,
//! so every field is written as an attribute (`<Clients Id="1" Name=" Ann " .../>`),
//! whose value is read back verbatim. Field names are the same as in the JSON
//! and CSV snapshots.

use crate::types::{Amount, Atm, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "ClientsExport")]
pub struct XmlClients {
    #[serde(rename = "Clients", default)]
    pub clients: Vec<XmlClient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlClient {
    #[serde(rename = "@Id")]
    id: i64,
    #[serde(rename = "@Name")]
    name: String,
    #[serde(rename = "@Login")]
    login: String,
    #[serde(rename = "@Password")]
    password: String,
    #[serde(rename = "@Balance")]
    balance: Amount,
    #[serde(rename = "@BalanceNumber")]
    balance_number: i64,
    #[serde(rename = "@PhoneNumber")]
    phone_number: i64,
}

impl From<Client> for XmlClient {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            login: client.login,
            password: client.password,
            balance: client.balance,
            balance_number: client.account_number,
            phone_number: client.phone_number,
        }
    }
}

impl From<XmlClient> for Client {
    fn from(xml: XmlClient) -> Self {
        Client {
            id: xml.id,
            name: xml.name,
            login: xml.login,
            password: xml.password,
            balance: xml.balance,
            account_number: xml.balance_number,
            phone_number: xml.phone_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "AtmsExport")]
pub struct XmlAtms {
    #[serde(rename = "Atms", default)]
    pub atms: Vec<XmlAtm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlAtm {
    #[serde(rename = "@Id")]
    id: i64,
    #[serde(rename = "@Name")]
    name: String,
    #[serde(rename = "@Address")]
    address: String,
}

impl From<Atm> for XmlAtm {
    fn from(atm: Atm) -> Self {
        Self {
            id: atm.id,
            name: atm.name,
            address: atm.address,
        }
    }
}

impl From<XmlAtm> for Atm {
    fn from(xml: XmlAtm) -> Self {
        Atm {
            id: xml.id,
            name: xml.name,
            address: xml.address,
        }
    }
}
