//! Document framing: markers, header variants and package decorations

use chrono::NaiveDateTime;

use super::config::{GeneratorConfig, HeaderStyle};

pub const START_MARKER: &str = "@startuml";
pub const END_MARKER: &str = "@enduml";

const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const CAPTION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Line-oriented text buffer for one diagram document
#[derive(Debug, Default)]
pub struct DocumentWriter {
    buf: String,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line, terminated with `\n`
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    /// Append text verbatim, adding a final newline if it lacks one
    pub fn block(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buf.push_str(text);
        if !text.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Write the start marker and the configured header section
pub fn write_document_header(
    writer: &mut DocumentWriter,
    config: &GeneratorConfig,
    timestamp: NaiveDateTime,
) {
    writer.line(START_MARKER);
    match &config.header {
        HeaderStyle::Breadcrumb => {
            writer.line("allow_mixing");
            let mut previous: Option<&str> = None;
            for segment in config.root_segments() {
                writer.line(format!("artifact {}", segment));
                if let Some(prev) = previous {
                    writer.line(format!("{} --> {}", prev, segment));
                }
                previous = Some(segment);
            }
        }
        HeaderStyle::Styled { stylesheet } => {
            writer.block(stylesheet);
            writer.line(format!(
                "header Generated {}",
                timestamp.format(HEADER_TIME_FORMAT)
            ));
        }
    }
}

/// The decoration written right before `package <module> {`, if any
pub fn package_decoration(
    config: &GeneratorConfig,
    module: &str,
    timestamp: NaiveDateTime,
) -> Option<String> {
    match &config.header {
        HeaderStyle::Breadcrumb => config
            .root_segments()
            .last()
            .map(|segment| format!("{} --> {}", segment, module)),
        HeaderStyle::Styled { .. } => Some(format!(
            "caption {} {}",
            module,
            timestamp.format(CAPTION_DATE_FORMAT)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    fn header(config: &GeneratorConfig) -> String {
        let mut writer = DocumentWriter::new();
        write_document_header(&mut writer, config, fixed_time());
        writer.finish()
    }

    #[test]
    fn test_breadcrumb_header() {
        assert_eq!(
            header(&GeneratorConfig::new("Shop.Core")),
            "@startuml\nallow_mixing\nartifact Shop\nartifact Core\nShop --> Core\n"
        );
    }

    #[test]
    fn test_breadcrumb_header_without_root() {
        assert_eq!(header(&GeneratorConfig::default()), "@startuml\nallow_mixing\n");
    }

    #[test]
    fn test_styled_header() {
        let config = GeneratorConfig::new("A").with_stylesheet("skinparam shadowing false");
        assert_eq!(
            header(&config),
            "@startuml\nskinparam shadowing false\nheader Generated 2024-03-09 14:05:07\n"
        );
    }

    #[test]
    fn test_package_decorations() {
        let breadcrumb = GeneratorConfig::new("Shop.Core");
        assert_eq!(
            package_decoration(&breadcrumb, "Orders", fixed_time()).as_deref(),
            Some("Core --> Orders")
        );
        assert_eq!(
            package_decoration(&GeneratorConfig::default(), "Orders", fixed_time()),
            None
        );

        let styled = GeneratorConfig::default().with_stylesheet("");
        assert_eq!(
            package_decoration(&styled, "Orders", fixed_time()).as_deref(),
            Some("caption Orders 2024-03-09")
        );
    }

    #[test]
    fn test_block_keeps_existing_newline() {
        let mut writer = DocumentWriter::new();
        writer.block("a\nb\n");
        writer.block("c");
        writer.block("");
        assert_eq!(writer.finish(), "a\nb\nc\n");
    }
}
