//! Generator configuration
//!
//! Defaults mirror the VM headers via `protogen_abi`. Tests and embedders can override individual spellings with the
//! `with_*` builders.

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Mandatory first parameter of every builtin
    pub ctx_param: String,
    /// Receiver parameter binding a builtin to a prototype
    pub self_param: String,
    /// ID assigned to the first builtin function
    pub first_builtin_function: u32,
    /// Header included by the generated file
    pub include_header: String,
    /// Name of the generated file
    pub output_file_name: String,
    /// VM object types, in enum order
    ///
    /// Empty by default: the master table then gets one slot per observed object key. When set (from the object enum
    /// in `devs_internal.h`), every listed type gets a slot and unlisted keys are reported.
    pub known_objects: Vec<String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            ctx_param: protogen_abi::CTX_PARAM.to_string(),
            self_param: protogen_abi::SELF_PARAM.to_string(),
            first_builtin_function: protogen_abi::FIRST_BUILTIN_FUNCTION,
            include_header: protogen_abi::INTERNAL_HEADER.to_string(),
            output_file_name: protogen_abi::OUTPUT_FILE_NAME.to_string(),
            known_objects: Vec::new(),
        }
    }
}

impl GenConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first builtin function ID
    pub fn with_first_builtin_function(mut self, id: u32) -> Self {
        self.first_builtin_function = id;
        self
    }

    /// Replace the known VM object types
    pub fn with_known_objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_objects = objects.into_iter().map(Into::into).collect();
        self
    }

    /// Set the generated file name
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    /// Whether a known-object list was configured
    pub fn has_known_objects(&self) -> bool {
        !self.known_objects.is_empty()
    }

    /// Whether `key` is one of the configured VM object types
    pub fn is_known_object(&self, key: &str) -> bool {
        self.known_objects.iter().any(|k| k == key)
    }
}
