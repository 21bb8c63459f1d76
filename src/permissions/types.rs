use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A device capability that hosted web content can ask the engine for.
///
/// Engines describe resources in their own vocabulary (WebKitGTK uses
/// request subclasses, WebView2 a permission-kind enum). Bindings map the
/// ones we know onto `Camera` / `Microphone` and pass anything else through
/// as `Other`, so a grant never silently drops a resource the engine asked
/// about.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Camera,
    Microphone,
    /// Engine-specific resource identifier, kept verbatim.
    Other(String),
}

impl Capability {
    pub fn as_str(&self) -> &str {
        match self {
            Capability::Camera => "camera",
            Capability::Microphone => "microphone",
            Capability::Other(s) => s.as_str(),
        }
    }

    pub fn from_identifier(s: &str) -> Self {
        match s {
            "camera" => Capability::Camera,
            "microphone" => Capability::Microphone,
            other => Capability::Other(other.to_string()),
        }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Capability::from_identifier(&s))
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of resources carried by one request. Ordered so logs and event
/// payloads are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn contains(&self, capability: &Capability) -> bool {
        self.0.contains(capability)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Capability; N]> for CapabilitySet {
    fn from(caps: [Capability; N]) -> Self {
        caps.into_iter().collect()
    }
}

impl std::fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, cap) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(cap.as_str())?;
        }
        f.write_str("}")
    }
}

/// The resolution handed back to the engine for one request.
///
/// Also the payload of the `shell://capability-granted` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub request_id: uuid::Uuid,
    pub origin: Option<String>,
    pub resources: CapabilitySet,
    pub granted_at: chrono::DateTime<chrono::Utc>,
}
