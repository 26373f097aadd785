use serde::{Deserialize, Serialize};

// --- Container resources ---

/// Requests and limits declared by one container, as raw quantity text.
/// An absent value contributes nothing to namespace totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerResources {
    pub name: String,
    #[serde(default)]
    pub cpu_request: Option<String>,
    #[serde(default)]
    pub cpu_limit: Option<String>,
    #[serde(default)]
    pub memory_request: Option<String>,
    #[serde(default)]
    pub memory_limit: Option<String>,
}

impl ContainerResources {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_cpu(mut self, request: &str, limit: &str) -> Self {
        self.cpu_request = Some(request.to_string());
        self.cpu_limit = Some(limit.to_string());
        self
    }

    pub fn with_memory(mut self, request: &str, limit: &str) -> Self {
        self.memory_request = Some(request.to_string());
        self.memory_limit = Some(limit.to_string());
        self
    }
}

// --- Pod ---

/// The resource view of a pod: its name and one entry per container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodResources {
    pub name: String,
    #[serde(default)]
    pub containers: Vec<ContainerResources>,
}

impl PodResources {
    pub fn new(name: impl Into<String>, containers: Vec<ContainerResources>) -> Self {
        Self {
            name: name.into(),
            containers,
        }
    }
}
