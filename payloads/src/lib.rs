pub mod api_client;

pub use api_client::{APIClient, ClientError, DEFAULT_ADDRESS};

use serde::{Deserialize, Serialize};

/// Key used to look up an ad slot (a cast hash on the ad service).
///
/// Always trimmed and never empty; construct with [`Identifier::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct Identifier(String);

impl Identifier {
    /// Trim surrounding whitespace, returning `None` if nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The account that bought the ad slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub fid: u64,
    pub username: String,
    pub avatar: String,
    pub display_name: String,
    pub address: String,
}

/// Everything needed to render an ad card.
///
/// Fields missing from the service response deserialize to empty strings
/// rather than failing the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdDetails {
    #[serde(default)]
    pub image: String,
    /// Click-through destination.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub buy_slot_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
}

impl AdDetails {
    pub fn has_buyer(&self) -> bool {
        self.buyer.is_some()
    }

    /// The image to show for this slot. Unsold slots (no buyer) use the
    /// host's placeholder when one is configured.
    pub fn display_image<'a>(&'a self, default_image: Option<&'a str>) -> &'a str {
        match (&self.buyer, default_image) {
            (None, Some(default_image)) => default_image,
            _ => &self.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_trimmed() {
        let id = Identifier::parse("  0xABC  ").unwrap();
        assert_eq!(id.as_str(), "0xABC");
        assert_eq!(id.to_string(), "0xABC");
    }

    #[test]
    fn blank_identifier_is_rejected() {
        assert_eq!(Identifier::parse(""), None);
        assert_eq!(Identifier::parse(" \t\n "), None);
    }

    #[test]
    fn details_deserialize_without_buyer() {
        let details: AdDetails =
            serde_json::from_str(r#"{"image":"i","url":"u","buySlotUrl":"b"}"#)
                .unwrap();
        assert_eq!(details.buy_slot_url, "b");
        assert!(!details.has_buyer());
    }

    #[test]
    fn details_tolerate_missing_fields() {
        let details: AdDetails = serde_json::from_str(r#"{"url":"u"}"#).unwrap();
        assert_eq!(details.image, "");
        assert_eq!(details.url, "u");
    }

    #[test]
    fn buyer_uses_camel_case() {
        let details: AdDetails = serde_json::from_str(
            r#"{"image":"i","url":"u","buySlotUrl":"b","buyer":{
                "fid":12345,"username":"testuser","avatar":"a",
                "displayName":"Test User","address":"0x1234"}}"#,
        )
        .unwrap();
        let buyer = details.buyer.unwrap();
        assert_eq!(buyer.fid, 12345);
        assert_eq!(buyer.display_name, "Test User");
    }

    #[test]
    fn default_image_only_replaces_unsold_slots() {
        let mut details = AdDetails {
            image: "i".into(),
            url: "u".into(),
            buy_slot_url: "b".into(),
            buyer: None,
        };
        assert_eq!(details.display_image(Some("d")), "d");
        assert_eq!(details.display_image(None), "i");

        details.buyer = Some(Buyer {
            fid: 1,
            username: "u".into(),
            avatar: "a".into(),
            display_name: "U".into(),
            address: "0x".into(),
        });
        assert_eq!(details.display_image(Some("d")), "i");
    }
}
