//! External name derivation for labels and property names.

/// `lowercase(trim_prefix(declared))`, applied to entity and field names alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingPolicy {
    trim_prefix: Option<String>,
}

impl NamingPolicy {
    pub fn new(trim_prefix: Option<String>) -> Self {
        Self {
            trim_prefix: trim_prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Derive the external name of a declared identifier.
    pub fn external_name(&self, declared: &str) -> String {
        let trimmed = match &self.trim_prefix {
            Some(prefix) => declared.strip_prefix(prefix.as_str()).unwrap_or(declared),
            None => declared,
        };
        trimmed.to_lowercase()
    }

    /// External name honouring an explicit `#[ngorm(name = "...")]` override.
    pub fn resolve(&self, declared: &str, explicit: Option<&str>) -> String {
        match explicit {
            Some(name) => name.to_string(),
            None => self.external_name(declared),
        }
    }
}

/// Strip the raw-identifier prefix syn keeps on `r#type` style names.
pub fn unraw(ident: &syn::Ident) -> String {
    let s = ident.to_string();
    match s.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        let policy = NamingPolicy::default();
        assert_eq!(policy.external_name("Person"), "person");
        assert_eq!(policy.external_name("UserName"), "username");
    }

    #[test]
    fn test_trim_prefix() {
        let policy = NamingPolicy::new(Some("Db".to_string()));
        assert_eq!(policy.external_name("DbPerson"), "person");
        assert_eq!(policy.external_name("Person"), "person");
        assert_eq!(policy.external_name("Db"), "");
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let policy = NamingPolicy::new(Some(String::new()));
        assert_eq!(policy, NamingPolicy::default());
    }

    #[test]
    fn test_explicit_override_is_verbatim() {
        let policy = NamingPolicy::new(Some("Db".to_string()));
        assert_eq!(policy.resolve("DbPerson", Some("People")), "People");
        assert_eq!(policy.resolve("DbPerson", None), "person");
    }

    #[test]
    fn test_unraw() {
        let ident = syn::Ident::new_raw("type", proc_macro2::Span::call_site());
        assert_eq!(unraw(&ident), "type");
    }
}
