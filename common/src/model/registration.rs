use serde::{Deserialize, Serialize};

/// The fixed list of Connect Groups a registrant may belong to.
///
/// The group selector on the form only ever offers these names, and the
/// backend rejects anything outside this list when `hasJoinedCG` is true.
pub const CONNECT_GROUPS: [&str; 7] = [
    "CG Angela",
    "CG Samuel",
    "CG Ezra",
    "CG William",
    "CG Marciella",
    "CG Felicia Clara",
    "CG Sherline",
];

/// Sentinel stored in place of a group name for guests who have not joined
/// a Connect Group.
pub const NO_GROUP: &str = "-";

fn default_true() -> bool {
    true
}

/// A registration as typed by the guest, before the server has assigned an
/// identity to it.
///
/// Wire names follow the original registration table schema (`hasJoinedCG`,
/// `connectGroup`, `transferProof`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationInput {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(rename = "hasJoinedCG")]
    pub has_joined_cg: bool,
    #[serde(rename = "connectGroup")]
    pub connect_group: Option<String>,
    /// Food the guest plans to bring, free text.
    #[serde(default, rename = "foodItem")]
    pub food_item: String,
    /// Drink the guest plans to bring, free text.
    #[serde(default, rename = "drinkItem")]
    pub drink_item: String,
    #[serde(default = "default_true", rename = "bringingGift")]
    pub bringing_gift: bool,
    /// Proof-of-payment reference: an inline `data:` URL or a hosted URL.
    #[serde(default, rename = "transferProof")]
    pub transfer_proof: String,
}

impl Default for RegistrationInput {
    fn default() -> Self {
        RegistrationInput {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            has_joined_cg: false,
            connect_group: None,
            food_item: String::new(),
            drink_item: String::new(),
            bringing_gift: true,
            transfer_proof: String::new(),
        }
    }
}

/// A persisted registration. `id` and `created_at` are generated by the
/// server at insertion time and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(rename = "hasJoinedCG")]
    pub has_joined_cg: bool,
    #[serde(rename = "connectGroup")]
    pub connect_group: Option<String>,
    #[serde(default, rename = "foodItem")]
    pub food_item: String,
    #[serde(default, rename = "drinkItem")]
    pub drink_item: String,
    #[serde(default = "default_true", rename = "bringingGift")]
    pub bringing_gift: bool,
    #[serde(rename = "transferProof")]
    pub transfer_proof: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Registration {
    /// Builds the stored record from a (validated) input plus the
    /// server-generated identity.
    pub fn from_input(input: RegistrationInput, id: String, created_at: String) -> Self {
        Registration {
            id,
            name: input.name,
            phone: input.phone,
            email: input.email,
            has_joined_cg: input.has_joined_cg,
            connect_group: input.connect_group,
            food_item: input.food_item,
            drink_item: input.drink_item,
            bringing_gift: input.bringing_gift,
            transfer_proof: input.transfer_proof,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_the_registration_schema() {
        let input = RegistrationInput {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            has_joined_cg: true,
            connect_group: Some("CG Samuel".to_string()),
            transfer_proof: "https://host/proof.jpg".to_string(),
            ..RegistrationInput::default()
        };

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["hasJoinedCG"], true);
        assert_eq!(json["connectGroup"], "CG Samuel");
        assert_eq!(json["transferProof"], "https://host/proof.jpg");
        assert_eq!(json["bringingGift"], true);
    }

    #[test]
    fn bringing_gift_defaults_to_true_when_absent() {
        let input: RegistrationInput = serde_json::from_str(
            r#"{"name":"A","email":"a@b.c","hasJoinedCG":false,"connectGroup":null}"#,
        )
        .unwrap();
        assert!(input.bringing_gift);
        assert!(input.transfer_proof.is_empty());
    }

    #[test]
    fn missing_membership_answer_is_a_deserialization_error() {
        let result: Result<RegistrationInput, _> =
            serde_json::from_str(r#"{"name":"A","email":"a@b.c","connectGroup":null}"#);
        assert!(result.is_err());
    }
}
