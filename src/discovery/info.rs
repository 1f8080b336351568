//! Advertised server records

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::protocol::{ImageClient, ImageServer, ProtocolType, UNUSED_ADDRESS};

/// What a server advertises to the discovery service
///
/// Text form, one line:
///
/// ```text
/// name address protocol_version protocol_type
/// ```
///
/// The protocol type is written as its numeric code. No field may be empty
/// or contain whitespace; [`validate`](Self::validate) checks this before a
/// record is sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveryInfo {
    /// Name looked up by clients
    pub name: String,
    /// Endpoint clients connect to
    pub address: String,
    /// Protocol spoken at `address`
    pub protocol_type: ProtocolType,
    /// Version of that protocol
    pub protocol_version: String,
}

impl DiscoveryInfo {
    /// Create a record from its fields
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        protocol_type: ProtocolType,
        protocol_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            protocol_type,
            protocol_version: protocol_version.into(),
        }
    }

    /// Describe a running server under `name`
    ///
    /// Fails with [`Error::NotStarted`] if the server has no address yet.
    pub fn for_server<S: ImageServer>(name: impl Into<String>, server: &S) -> Result<Self> {
        let address = server.address().ok_or(Error::NotStarted)?;
        Ok(Self::new(
            name,
            address.to_string(),
            server.protocol_type(),
            server.protocol_version(),
        ))
    }

    /// Describe what a client is looking for under `name`
    ///
    /// Clients have no address of their own; the result is meant as a
    /// `find` query.
    pub fn for_client<C: ImageClient>(name: impl Into<String>, client: &C) -> Self {
        Self::new(
            name,
            UNUSED_ADDRESS,
            client.protocol_type(),
            client.protocol_version(),
        )
    }

    /// Check that every text field survives the text form
    ///
    /// Fails with [`Error::Parse`] naming the first field that is empty or
    /// contains whitespace.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("address", &self.address),
            ("protocol version", &self.protocol_version),
        ];
        for (what, value) in fields {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(Error::parse(format!(
                    "discovery info: invalid {} {:?}",
                    what, value
                )));
            }
        }
        Ok(())
    }

    /// Check if `other` answers a query for this record
    pub(crate) fn matches(&self, other: &DiscoveryInfo) -> bool {
        self.name == other.name
            && self.protocol_type == other.protocol_type
            && self.protocol_version == other.protocol_version
    }
}

impl fmt::Display for DiscoveryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.address, self.protocol_version, self.protocol_type
        )
    }
}

impl FromStr for DiscoveryInfo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let mut field = |what: &str| {
            tokens
                .next()
                .ok_or_else(|| Error::parse(format!("discovery info: missing {}", what)))
        };

        let name = field("name")?.to_string();
        let address = field("address")?.to_string();
        let protocol_version = field("protocol version")?.to_string();
        let protocol_type = field("protocol type")?.parse()?;

        Ok(Self {
            name,
            address,
            protocol_type,
            protocol_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FastImageClient;
    use crate::server::ReliableImageServer;
    use proptest::prelude::*;

    #[test]
    fn test_text_field_order() {
        let info = DiscoveryInfo::new(
            "cam1",
            "tcp://10.0.0.2:5562",
            ProtocolType::ReliableImage,
            "1",
        );
        assert_eq!(info.to_string(), "cam1 tcp://10.0.0.2:5562 1 1");
    }

    #[test]
    fn test_parse_errors() {
        assert!("cam1 addr 1".parse::<DiscoveryInfo>().is_err());
        assert!("cam1 addr 1 fast".parse::<DiscoveryInfo>().is_err());
        assert!("cam1 addr 1 42".parse::<DiscoveryInfo>().is_err());
        assert_eq!(
            "cam1 addr 2 100 trailing".parse::<DiscoveryInfo>().unwrap(),
            DiscoveryInfo::new("cam1", "addr", ProtocolType::User, "2")
        );
    }

    #[test]
    fn test_validate_rejects_unsendable_fields() {
        let good = DiscoveryInfo::new("cam1", "tcp://10.0.0.1:5562", ProtocolType::FastImage, "1");
        assert!(good.validate().is_ok());

        let spaced = DiscoveryInfo::new(
            "front cam",
            "tcp://10.0.0.1:5562",
            ProtocolType::FastImage,
            "1",
        );
        let err = spaced.validate().unwrap_err();
        assert!(matches!(err, Error::Parse(ref msg) if msg.contains("name")));

        let tabbed = DiscoveryInfo::new(
            "cam1",
            "tcp://10.0.0.1:5562",
            ProtocolType::FastImage,
            "1\t2",
        );
        assert!(tabbed.validate().is_err());

        let no_address = DiscoveryInfo::new("cam1", "", ProtocolType::FastImage, "1");
        let err = no_address.validate().unwrap_err();
        assert!(matches!(err, Error::Parse(ref msg) if msg.contains("address")));
    }

    #[test]
    fn test_matches_ignores_address() {
        let a = DiscoveryInfo::new("cam1", "A", ProtocolType::FastImage, "1");
        let b = DiscoveryInfo::new("cam1", "B", ProtocolType::FastImage, "1");
        let c = DiscoveryInfo::new("cam1", "A", ProtocolType::ReliableImage, "1");
        let d = DiscoveryInfo::new("cam1", "A", ProtocolType::FastImage, "2");

        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert!(!a.matches(&d));
    }

    #[tokio::test]
    async fn test_for_server_and_client() {
        let mut server = ReliableImageServer::new();
        assert!(matches!(
            DiscoveryInfo::for_server("cam1", &server),
            Err(Error::NotStarted)
        ));

        server.startup("tcp://127.0.0.1:0").await.unwrap();
        let info = DiscoveryInfo::for_server("cam1", &server).unwrap();
        assert_eq!(info.protocol_type, ProtocolType::ReliableImage);
        assert_eq!(info.protocol_version, "1");
        assert!(info.address.starts_with("tcp://127.0.0.1:"));

        let query = DiscoveryInfo::for_client("cam1", &FastImageClient::new());
        assert_eq!(query.address, "unused");
        assert_eq!(query.protocol_type, ProtocolType::FastImage);
    }

    proptest! {
        #[test]
        fn test_text_roundtrip(
            name in "[a-zA-Z0-9_.:/-]{1,24}",
            address in "[a-zA-Z0-9_.:/-]{1,32}",
            version in "[0-9.]{1,6}",
            proto in prop::sample::select(vec![
                ProtocolType::FastImage,
                ProtocolType::ReliableImage,
                ProtocolType::Discovery,
                ProtocolType::User,
            ]),
        ) {
            let info = DiscoveryInfo::new(name, address, proto, version);
            prop_assert!(info.validate().is_ok());
            let parsed: DiscoveryInfo = info.to_string().parse().unwrap();
            prop_assert_eq!(parsed, info);
        }
    }
}
