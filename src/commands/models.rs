use std::path::PathBuf;
use crate::utils::config::DEFAULT_TOP_EVENTS;

/// Arguments for the parse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// Raw execution log to parse
    pub input: PathBuf,

    /// Output path for the JSON trace (optional)
    pub output_json: Option<PathBuf>,

    /// Print the indented span tree to stdout
    pub print_tree: bool,

    /// Print a text summary to stdout
    pub print_summary: bool,

    /// Only print subtrees rooted at this base event code
    pub filter: Option<String>,

    /// Deepest tree level to print
    pub max_depth: Option<usize>,

    /// Number of event codes listed in the summary
    pub top_events: usize,
}

impl Default for ParseArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_json: None,
            print_tree: false,
            print_summary: false,
            filter: None,
            max_depth: None,
            top_events: DEFAULT_TOP_EVENTS,
        }
    }
}
