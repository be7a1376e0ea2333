mod prune_service;

pub use prune_service::{
    CONFIRM_PROMPT, PruneOptions, PruneReport, PruneService, REPORT_HEADER, confirm,
};
