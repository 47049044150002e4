/// Result of trimming one source video, reported by a [`super::TrimActor`].
#[derive(Debug)]
pub struct VideoOutcome {
    pub base_name: String,
    /// Windows the planner produced for this video
    pub windows_planned: usize,
    /// Segments that were both extracted and filed into the destination folder
    pub segments_filed: usize,
}
