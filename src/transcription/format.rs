//! Response format variants and output filename derivation.
//!
//! Each variant corresponds to one remote call: a wire-level response format plus,
//! for the verbose JSON variants, a timestamp granularity. The output filename is
//! a pure function of the input base name and the variant label.

/// Response format accepted by the transcription endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    Json,
    Text,
    Srt,
    Vtt,
    VerboseJson,
}

impl ResponseFormat {
    /// Wire value sent as the `response_format` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Text => "text",
            ResponseFormat::Srt => "srt",
            ResponseFormat::Vtt => "vtt",
            ResponseFormat::VerboseJson => "verbose_json",
        }
    }
}

/// Timestamp granularity for the verbose JSON variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampGranularity {
    Word,
    Segment,
}

impl TimestampGranularity {
    /// Wire value sent as a `timestamp_granularities[]` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampGranularity::Word => "word",
            TimestampGranularity::Segment => "segment",
        }
    }
}

/// One fan-out variant: a requested response shape keyed by a stable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVariant {
    Json,
    Text,
    Srt,
    Vtt,
    VerboseJsonWord,
    VerboseJsonSegment,
}

impl FormatVariant {
    /// All variants, in fan-out order. Requests are issued and results reported
    /// in exactly this order.
    pub const ALL: [FormatVariant; 6] = [
        FormatVariant::Json,
        FormatVariant::Text,
        FormatVariant::Srt,
        FormatVariant::Vtt,
        FormatVariant::VerboseJsonWord,
        FormatVariant::VerboseJsonSegment,
    ];

    /// Stable label keying results and output filenames.
    pub fn label(&self) -> &'static str {
        match self {
            FormatVariant::Json => "json",
            FormatVariant::Text => "text",
            FormatVariant::Srt => "srt",
            FormatVariant::Vtt => "vtt",
            FormatVariant::VerboseJsonWord => "verbose_json_word",
            FormatVariant::VerboseJsonSegment => "verbose_json_segment",
        }
    }

    /// The response format requested from the API for this variant.
    pub fn response_format(&self) -> ResponseFormat {
        match self {
            FormatVariant::Json => ResponseFormat::Json,
            FormatVariant::Text => ResponseFormat::Text,
            FormatVariant::Srt => ResponseFormat::Srt,
            FormatVariant::Vtt => ResponseFormat::Vtt,
            FormatVariant::VerboseJsonWord | FormatVariant::VerboseJsonSegment => {
                ResponseFormat::VerboseJson
            }
        }
    }

    /// Timestamp granularity for verbose variants, `None` otherwise.
    pub fn granularity(&self) -> Option<TimestampGranularity> {
        match self {
            FormatVariant::VerboseJsonWord => Some(TimestampGranularity::Word),
            FormatVariant::VerboseJsonSegment => Some(TimestampGranularity::Segment),
            _ => None,
        }
    }

    /// Whether the API returns a JSON document for this variant.
    pub fn is_structured(&self) -> bool {
        matches!(
            self.response_format(),
            ResponseFormat::Json | ResponseFormat::VerboseJson
        )
    }

    /// Derives the output filename for this variant from the audio base name.
    ///
    /// Verbose variants get a `_<label>.json` suffix so the two granularities
    /// never collide; plain `json` keeps the bare `.json` extension; text-like
    /// variants use the label itself as the extension.
    pub fn output_file_name(&self, base_name: &str) -> String {
        match self {
            FormatVariant::VerboseJsonWord | FormatVariant::VerboseJsonSegment => {
                format!("{base_name}_{}.json", self.label())
            }
            FormatVariant::Json => format!("{base_name}.json"),
            _ => format!("{base_name}.{}", self.label()),
        }
    }
}

impl std::fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_out_order() {
        let labels: Vec<_> = FormatVariant::ALL.iter().map(|v| v.label()).collect();
        assert_eq!(
            labels,
            [
                "json",
                "text",
                "srt",
                "vtt",
                "verbose_json_word",
                "verbose_json_segment"
            ]
        );
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(FormatVariant::Json.output_file_name("clip1"), "clip1.json");
        assert_eq!(FormatVariant::Text.output_file_name("clip1"), "clip1.text");
        assert_eq!(FormatVariant::Srt.output_file_name("clip1"), "clip1.srt");
        assert_eq!(FormatVariant::Vtt.output_file_name("clip1"), "clip1.vtt");
        assert_eq!(
            FormatVariant::VerboseJsonWord.output_file_name("clip1"),
            "clip1_verbose_json_word.json"
        );
        assert_eq!(
            FormatVariant::VerboseJsonSegment.output_file_name("clip1"),
            "clip1_verbose_json_segment.json"
        );
    }

    #[test]
    fn test_file_names_never_collide() {
        let names: std::collections::HashSet<_> = FormatVariant::ALL
            .iter()
            .map(|v| v.output_file_name("recording"))
            .collect();
        assert_eq!(names.len(), FormatVariant::ALL.len());
    }

    #[test]
    fn test_verbose_variants_share_wire_format() {
        assert_eq!(
            FormatVariant::VerboseJsonWord.response_format(),
            ResponseFormat::VerboseJson
        );
        assert_eq!(
            FormatVariant::VerboseJsonSegment.response_format(),
            ResponseFormat::VerboseJson
        );
        assert_eq!(
            FormatVariant::VerboseJsonWord.granularity(),
            Some(TimestampGranularity::Word)
        );
        assert_eq!(
            FormatVariant::VerboseJsonSegment.granularity(),
            Some(TimestampGranularity::Segment)
        );
        assert_eq!(FormatVariant::Srt.granularity(), None);
    }

    #[test]
    fn test_structured_variants() {
        assert!(FormatVariant::Json.is_structured());
        assert!(FormatVariant::VerboseJsonWord.is_structured());
        assert!(!FormatVariant::Text.is_structured());
        assert!(!FormatVariant::Srt.is_structured());
        assert!(!FormatVariant::Vtt.is_structured());
    }
}
