//! JSON bodies exchanged with the banking service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::model::{Account, Credentials, TransferRequest};

#[derive(Serialize, Debug)]
pub struct LoginBody<'a> {
    #[serde(rename = "id")]
    pub identifier: &'a str,
    #[serde(rename = "password")]
    pub secret: &'a str,
}

impl<'a> From<&'a Credentials> for LoginBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            identifier: &credentials.identifier,
            secret: &credentials.secret,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub granted: bool,
}

#[derive(Serialize, Debug)]
pub struct TransferBody<'a> {
    pub sender: &'a str,
    pub recipient: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl<'a> From<&'a TransferRequest> for TransferBody<'a> {
    fn from(request: &'a TransferRequest) -> Self {
        Self {
            sender: request.sender_id(),
            recipient: request.recipient_id(),
            amount: request.amount(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct TransferResponse {
    pub result: bool,
}

#[derive(Deserialize, Debug)]
pub struct AccountResponse {
    pub id: String,
    pub main: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl From<AccountResponse> for Account {
    fn from(response: AccountResponse) -> Self {
        Self {
            id: response.id,
            is_primary: response.main,
            balance: response.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: the login body uses the service's field names.
    #[test]
    fn test_login_body_serialization() {
        let credentials = Credentials::new("1234", "p@sswOrd");
        let serialized = serde_json::to_string(&LoginBody::from(&credentials)).unwrap();
        assert_eq!(serialized, r#"{"id":"1234","password":"p@sswOrd"}"#);
    }

    #[test]
    fn test_transfer_body_sends_amount_as_number() {
        let request = TransferRequest::new("1", "2", Decimal::new(10050, 2)).unwrap();
        let value = serde_json::to_value(TransferBody::from(&request)).unwrap();
        assert_eq!(value["sender"], "1");
        assert_eq!(value["recipient"], "2");
        assert_eq!(value["amount"].as_f64(), Some(100.5));
    }

    #[test]
    fn test_accepted_amount_is_sent_digit_for_digit() {
        let amount = Decimal::from_str_exact("1234567.89").unwrap();
        let request = TransferRequest::new("1", "2", amount).unwrap();
        let serialized = serde_json::to_string(&TransferBody::from(&request)).unwrap();
        assert_eq!(
            serialized,
            r#"{"sender":"1","recipient":"2","amount":1234567.89}"#
        );
    }

    #[test]
    fn test_account_list_deserialization() {
        let body = r#"[
            {"id":"A1","main":true,"balance":2354.23},
            {"id":"A2","main":false,"balance":10}
        ]"#;
        let accounts: Vec<AccountResponse> = serde_json::from_str(body).unwrap();
        let accounts: Vec<Account> = accounts.into_iter().map(Account::from).collect();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, "A1");
        assert!(accounts[0].is_primary);
        assert_eq!(accounts[0].balance, Decimal::new(235423, 2));
        assert!(!accounts[1].is_primary);
        assert_eq!(accounts[1].balance, Decimal::TEN);
    }

    #[test]
    fn test_flag_responses_deserialize() {
        let login: LoginResponse = serde_json::from_str(r#"{"granted":true}"#).unwrap();
        let transfer: TransferResponse = serde_json::from_str(r#"{"result":false}"#).unwrap();
        assert!(login.granted);
        assert!(!transfer.result);
    }
}
