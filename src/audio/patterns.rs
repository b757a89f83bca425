/// Style used when a requested style is not in the table
pub const DEFAULT_STYLE: &str = "ambient";

/// A named set of partials and the tempo of their shared envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicPattern {
    pub name: &'static str,

    /// Partial frequencies in Hz
    pub frequencies: &'static [f64],

    /// Envelope rate; the envelope is `sin(t * tempo * PI)`
    pub tempo: f64,
}

static PATTERNS: [MusicPattern; 3] = [
    MusicPattern {
        name: "ambient",
        frequencies: &[220.0, 330.0, 440.0],
        tempo: 0.5,
    },
    MusicPattern {
        name: "upbeat",
        frequencies: &[262.0, 330.0, 392.0, 523.0],
        tempo: 2.0,
    },
    MusicPattern {
        name: "cinematic",
        frequencies: &[130.0, 196.0, 262.0, 330.0],
        tempo: 0.75,
    },
];

impl MusicPattern {
    /// Exact lookup by name
    pub fn get(name: &str) -> Option<&'static MusicPattern> {
        PATTERNS.iter().find(|pattern| pattern.name == name)
    }

    /// Lookup with fallback to the ambient pattern
    pub fn lookup(name: &str) -> &'static MusicPattern {
        Self::get(name).unwrap_or_else(|| {
            tracing::debug!("Unknown music style '{}', using {}", name, DEFAULT_STYLE);
            &PATTERNS[0]
        })
    }

    pub fn all() -> &'static [MusicPattern] {
        &PATTERNS
    }

    pub fn names() -> Vec<&'static str> {
        PATTERNS.iter().map(|pattern| pattern.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_invariants() {
        for pattern in MusicPattern::all() {
            assert!(!pattern.frequencies.is_empty(), "{}", pattern.name);
            assert!(pattern.tempo > 0.0, "{}", pattern.name);
        }
    }

    #[test]
    fn test_lookup_fallback() {
        assert_eq!(MusicPattern::lookup("upbeat").tempo, 2.0);
        assert_eq!(MusicPattern::lookup("polka").name, DEFAULT_STYLE);
        assert!(MusicPattern::get("polka").is_none());
        assert_eq!(MusicPattern::names(), vec!["ambient", "upbeat", "cinematic"]);
    }
}
