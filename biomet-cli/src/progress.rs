use indicatif::{ProgressBar, ProgressStyle};

pub fn default_progress_bar(label: &str, n_items: usize) -> ProgressBar {
    let progress_template = format!(
        "[{{wide_bar}}] {}: {{pos}}/{{len}} Time: ({{elapsed}}/{{duration}})",
        label
    );
    let progress = ProgressBar::new(n_items as u64);
    // The template is static apart from the label; fall back to the default
    // style rather than abort on a malformed one.
    if let Ok(style) = ProgressStyle::default_bar().template(&progress_template) {
        progress.set_style(style);
    }
    progress
}
