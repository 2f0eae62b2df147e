use console::Style;

use backdrop_core::composite::ReconstructionStats;
use backdrop_core::pipeline::config::PipelineConfig;
use backdrop_core::pipeline::SequenceSummary;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    warn: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Background Reconstruction"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(25)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(config.inputs.len())
    );
    if let (Some(first), Some(last)) = (config.inputs.first(), config.inputs.last()) {
        println!(
            "  {:<14}{}",
            s.label.apply_to("First"),
            s.path.apply_to(first.display())
        );
        println!(
            "  {:<14}{}",
            s.label.apply_to("Last"),
            s.path.apply_to(last.display())
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    match config.confidence_mask {
        Some(ref mask) => println!(
            "  {:<14}{}",
            s.label.apply_to("Mask"),
            s.path.apply_to(mask.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Mask"),
            s.disabled.apply_to("not written")
        ),
    }
    println!();

    let recon = &config.reconstruction;
    println!("  {}", s.header.apply_to("Reconstruction"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Depth"),
        s.value.apply_to(config.bit_depth)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Buckets"),
        s.value.apply_to(format!(
            "{} x {} levels",
            recon.buckets(config.bit_depth),
            recon.bucket_size
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Confidence"),
        s.value
            .apply_to(format!("{:.0}%", recon.confidence_level * 100.0))
    );
    println!();
}

fn count_style(s: &Styles, count: usize) -> &Style {
    if count > 0 {
        &s.warn
    } else {
        &s.value
    }
}

pub fn print_stats(stats: &ReconstructionStats) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<24}{}",
        s.label.apply_to("Frames read"),
        s.value.apply_to(stats.total_frames)
    );
    println!(
        "    {:<24}{}",
        s.label.apply_to("Confidence frames"),
        s.value.apply_to(stats.conf_frames)
    );
    println!(
        "    {:<24}{}",
        s.label.apply_to("Unresolved after pass 1"),
        count_style(&s, stats.first_pass_unresolved).apply_to(stats.first_pass_unresolved)
    );
    println!(
        "    {:<24}{}",
        s.label.apply_to("Low confidence pixels"),
        count_style(&s, stats.second_pass_unresolved).apply_to(stats.second_pass_unresolved)
    );
}

pub fn print_sequence_summary(summary: &SequenceSummary) {
    let s = Styles::new();
    let geometry = summary.geometry;

    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(summary.frames)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value
            .apply_to(format!("{}x{}", geometry.width, geometry.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Channels"),
        s.value.apply_to(geometry.channels)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Bit depth"),
        s.value.apply_to(summary.bit_depth)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Buckets"),
        s.value.apply_to(format!(
            "{} x {} levels",
            summary.buckets, summary.bucket_size
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Confidence"),
        s.value.apply_to(format!(
            "{:.0}% ({} frames)",
            summary.confidence_level * 100.0,
            summary.conf_frames
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Histograms"),
        s.value.apply_to(format!(
            "{:.1} MB",
            summary.histogram_bytes as f64 / (1024.0 * 1024.0)
        ))
    );
}
