// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The fixed battery of gateway calls replayed after a successful login.
//!
//! Each call is data: an endpoint path, a flat JSON body and optional extra
//! headers, with the subscriber values substituted at render time.

use serde_json::{Map, Value};

use super::identity::Subscriber;

pub const LOGIN_PATH: &str = "CorporateLogin/";
pub const LOGIN_PAYLOAD_FIELD: &str = "LoginPayload";

/// Source of one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Fixed(&'static str),
    /// Bare subscriber number.
    PureNumber,
    /// Composite `MPOS@MSISDN` token as supplied by the caller.
    Identifier,
}

impl Field {
    fn render(self, subscriber: &Subscriber<'_>) -> String {
        match self {
            Field::Fixed(value) => value.to_string(),
            Field::PureNumber => subscriber.pure_number.to_string(),
            Field::Identifier => subscriber.identifier.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CallTemplate {
    /// Key of this call's entry in the aggregate response.
    pub name: &'static str,
    pub path: &'static str,
    pub body: &'static [(&'static str, Field)],
    pub headers: &'static [(&'static str, Field)],
}

impl CallTemplate {
    pub fn render_body(&self, subscriber: &Subscriber<'_>) -> Value {
        let body: Map<String, Value> = self
            .body
            .iter()
            .map(|(key, field)| (key.to_string(), Value::String(field.render(subscriber))))
            .collect();
        Value::Object(body)
    }

    pub fn render_headers(&self, subscriber: &Subscriber<'_>) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, field)| (name.to_string(), field.render(subscriber)))
            .collect()
    }
}

const SENDER_CNIC: Field = Field::Fixed("3234345675432");
const QUOTE_ID: Field = Field::Fixed("1790704");

const IBFT_INQUIRY: &[(&str, Field)] = &[
    ("Amount", Field::Fixed("1")),
    ("AccountNumber", Field::Fixed("00020000011001325")),
    ("BankTitle", Field::Fixed("MOD")),
    ("SenderCNIC", SENDER_CNIC),
    ("SenderMSISDN", Field::PureNumber),
    ("ReceiverMSISDN", Field::Fixed("923139282625")),
    ("BankShortName", Field::Fixed("MOD")),
    ("TransactionPurpose", Field::Fixed("0350")),
];

const IBFT_TRANSFER: &[(&str, Field)] = &[
    ("Amount", Field::Fixed("1")),
    ("AccountNumber", Field::Fixed("00020000011005325")),
    ("BankTitle", Field::Fixed("MOD")),
    ("SenderCNIC", SENDER_CNIC),
    ("SenderMSISDN", Field::PureNumber),
    ("ReceiverMSISDN", Field::Fixed("923139282625")),
    ("BankShortName", Field::Fixed("MOD")),
    ("TransactionPurpose", Field::Fixed("0350")),
    ("MPOS", Field::Identifier),
    ("QuoteID", QUOTE_ID),
];

// The gateway's inquiry endpoint takes a lower-case `amount`.
const UTILITY_INQUIRY: &[(&str, Field)] = &[
    ("amount", Field::Fixed("2000")),
    ("ConsumerNumber", Field::Fixed("05131230277449")),
    ("SenderMSISDN", Field::PureNumber),
    ("SenderCNIC", SENDER_CNIC),
    ("Company", Field::Fixed("FESCO")),
];

const UTILITY_PAYMENT: &[(&str, Field)] = &[
    ("Amount", Field::Fixed("2000")),
    ("ConsumerNumber", Field::Fixed("05131230277449")),
    ("SenderMSISDN", Field::PureNumber),
    ("SenderCNIC", SENDER_CNIC),
    ("Company", Field::Fixed("FESCO")),
    ("QuoteID", QUOTE_ID),
];

const CASH_DEPOSIT: &[(&str, Field)] = &[
    ("Amount", Field::Fixed("50")),
    ("MSISDN", Field::PureNumber),
    ("MPOS", Field::Identifier),
];

const CASH_WITHDRAWAL: &[(&str, Field)] = &[
    ("Amount", Field::Fixed("5")),
    ("MSISDN", Field::Fixed("923482665224")),
    ("MPOS", Field::Identifier),
];

/// Calls issued after login, in dispatch order. Names are unique.
///
/// The utility payment is sent twice under two names; both outcomes are
/// reported.
pub static BATTERY: [CallTemplate; 7] = [
    CallTemplate {
        name: "OTCIBFT_Inquiry",
        path: "OTCIBFT/Inquiry",
        body: IBFT_INQUIRY,
        headers: &[],
    },
    CallTemplate {
        name: "OTCIBFT_Transfer",
        path: "OTCIBFT/Transfer",
        body: IBFT_TRANSFER,
        headers: &[],
    },
    CallTemplate {
        name: "OTCUtilityBill_Inquiry",
        path: "OTCUtilityBill/Inquiry",
        body: UTILITY_INQUIRY,
        headers: &[],
    },
    CallTemplate {
        name: "OTCUtilityBill_Payment",
        path: "OTCUtilityBill/Payment",
        body: UTILITY_PAYMENT,
        headers: &[],
    },
    CallTemplate {
        name: "OTCUtilityBill_Payment_Repeat",
        path: "OTCUtilityBill/Payment",
        body: UTILITY_PAYMENT,
        headers: &[],
    },
    CallTemplate {
        name: "CashDeposit",
        path: "CashDeposit/CashDeposit",
        body: CASH_DEPOSIT,
        headers: &[("MPOS", Field::Fixed("1111@923355923388"))],
    },
    CallTemplate {
        name: "CashWithdrawal",
        path: "CashWithdrawal/CashWithdrawal",
        body: CASH_WITHDRAWAL,
        headers: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    const SUBSCRIBER: Subscriber<'static> = Subscriber {
        identifier: "1010@923355923388",
        pure_number: "923355923388",
    };

    fn template(name: &str) -> &'static CallTemplate {
        BATTERY.iter().find(|t| t.name == name).unwrap()
    }

    #[test]
    fn battery_names_are_unique() {
        let names: HashSet<_> = BATTERY.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), BATTERY.len());
    }

    #[test]
    fn repeat_payment_hits_same_endpoint_with_same_body() {
        let first = template("OTCUtilityBill_Payment");
        let repeat = template("OTCUtilityBill_Payment_Repeat");
        assert_eq!(first.path, repeat.path);
        assert_eq!(
            first.render_body(&SUBSCRIBER),
            repeat.render_body(&SUBSCRIBER)
        );
    }

    #[test]
    fn inquiry_substitutes_pure_number() {
        let body = template("OTCIBFT_Inquiry").render_body(&SUBSCRIBER);
        assert_eq!(
            body,
            json!({
                "Amount": "1",
                "AccountNumber": "00020000011001325",
                "BankTitle": "MOD",
                "SenderCNIC": "3234345675432",
                "SenderMSISDN": "923355923388",
                "ReceiverMSISDN": "923139282625",
                "BankShortName": "MOD",
                "TransactionPurpose": "0350"
            })
        );
    }

    #[test]
    fn transfer_substitutes_identifier_for_mpos() {
        let body = template("OTCIBFT_Transfer").render_body(&SUBSCRIBER);
        assert_eq!(body["MPOS"], "1010@923355923388");
        assert_eq!(body["SenderMSISDN"], "923355923388");
        assert_eq!(body["QuoteID"], "1790704");
    }

    #[test]
    fn cash_deposit_carries_mpos_header() {
        let deposit = template("CashDeposit");
        assert_eq!(
            deposit.render_headers(&SUBSCRIBER),
            vec![("MPOS".to_string(), "1111@923355923388".to_string())]
        );
        assert_eq!(
            deposit.render_body(&SUBSCRIBER),
            json!({"Amount": "50", "MSISDN": "923355923388", "MPOS": "1010@923355923388"})
        );
    }

    #[test]
    fn withdrawal_uses_fixed_msisdn() {
        let body = template("CashWithdrawal").render_body(&SUBSCRIBER);
        assert_eq!(body["MSISDN"], "923482665224");
        assert!(template("CashWithdrawal")
            .render_headers(&SUBSCRIBER)
            .is_empty());
    }
}
