use indicatif::{ProgressBar, ProgressStyle};
use term_size::dimensions;

pub fn recipients_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);

    let term_width = dimensions().map(|(w, _)| w - 2).unwrap_or(40);
    let bar_width = if term_width > 20 { term_width - 20 } else { 20 };

    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:{bar_width}.cyan/blue}}] {{pos}}/{{len}} recipients"
            ))
            .expect("Invalid progress bar template.")
            .progress_chars("#>-"),
    );

    pb
}
