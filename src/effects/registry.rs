use std::collections::HashMap;

use crate::effects::{ColorPreset, EffectSpec};

/// Registry of named looks
///
/// A look is a reusable effect chain. The registry ships with a few built-in
/// looks; callers can register their own or override existing names.
pub struct LookRegistry {
    looks: HashMap<String, Vec<EffectSpec>>,
}

impl LookRegistry {
    /// Create a new registry with all built-in looks
    pub fn new() -> Self {
        let mut registry = Self {
            looks: HashMap::new(),
        };

        registry.register_builtin_looks();
        registry
    }

    fn register_builtin_looks(&mut self) {
        self.register(
            "cinematic",
            vec![
                EffectSpec::vignette(0.5),
                EffectSpec::color_grade(ColorPreset::Vintage),
                EffectSpec::film_grain(0.1),
            ],
        );

        self.register(
            "retro",
            vec![
                EffectSpec::color_grade(ColorPreset::Vintage),
                EffectSpec::film_grain(0.2),
                EffectSpec::vignette(0.4),
            ],
        );

        self.register(
            "neon",
            vec![
                EffectSpec::color_grade(ColorPreset::Cyberpunk),
                EffectSpec::vignette(0.3),
            ],
        );

        self.register(
            "dreamy",
            vec![
                EffectSpec::motion_blur(0.15),
                EffectSpec::color_grade(ColorPreset::Warm),
                EffectSpec::vignette(0.2),
            ],
        );
    }

    /// Register (or replace) a look
    pub fn register<S: Into<String>>(&mut self, name: S, chain: Vec<EffectSpec>) {
        self.looks.insert(name.into(), chain);
    }

    /// Get the effect chain for a look
    pub fn get(&self, name: &str) -> Option<&[EffectSpec]> {
        self.looks.get(name).map(Vec::as_slice)
    }

    /// All registered look names, sorted
    pub fn available_looks(&self) -> Vec<String> {
        let mut names: Vec<String> = self.looks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a look is available
    pub fn has_look(&self, name: &str) -> bool {
        self.looks.contains_key(name)
    }

    /// Get the number of registered looks
    pub fn len(&self) -> usize {
        self.looks.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.looks.is_empty()
    }
}

impl Default for LookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_looks_available() {
        let registry = LookRegistry::new();

        assert!(registry.has_look("cinematic"));
        assert!(registry.has_look("retro"));
        assert!(registry.has_look("neon"));
        assert!(registry.has_look("dreamy"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_builtin_chains_are_valid() {
        let registry = LookRegistry::new();
        for name in registry.available_looks() {
            let chain = registry.get(&name).unwrap();
            assert!(!chain.is_empty());
            assert!(chain.iter().all(|spec| spec.validate().is_ok()), "look {}", name);
        }
    }

    #[test]
    fn test_available_looks_sorted() {
        let registry = LookRegistry::new();
        assert_eq!(registry.available_looks(), vec!["cinematic", "dreamy", "neon", "retro"]);
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_custom_look_registration() {
        let mut registry = LookRegistry::new();
        registry.register("bleach", vec![EffectSpec::color_grade(ColorPreset::Cool)]);

        assert!(registry.has_look("bleach"));
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("bleach").unwrap().len(), 1);
    }
}
