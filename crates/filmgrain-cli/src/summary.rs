use std::path::Path;

use console::Style;
use filmgrain_core::params::GrainParameters;
use filmgrain_core::session::ProcessRequest;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    enabled: Style,
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
            enabled: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_request_summary(request: &ProcessRequest, endpoint: &str, output: &Path) {
    let s = Styles::new();
    let source = &request.source;

    println!();
    println!("  {}", s.title.apply_to("FilmGrain"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(source.file_name()));
    println!(
        "  {:<14}{} ({} bytes)",
        s.label.apply_to("Type"),
        s.value.apply_to(source.mime_type()),
        source.len()
    );
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    println!("  {:<14}{}", s.label.apply_to("Service"), s.path.apply_to(endpoint));
    println!();

    print_params(&s, &request.params);
    println!();
}

fn print_params(s: &Styles, p: &GrainParameters) {
    println!("  {}", s.header.apply_to("Grain"));
    let rows = [
        ("Power", p.grain_power.to_string()),
        ("Scale", p.scale.to_string()),
        ("Shadows", p.shadows.to_string()),
        ("Highs", p.highs.to_string()),
        ("Saturation", p.grain_sat.to_string()),
        ("Type", p.grain_type.to_string()),
        ("Source type", p.src_type.to_string()),
        ("Sharpen", p.sharpen.to_string()),
    ];
    for (label, value) in rows {
        println!("    {:<12}{}", s.label.apply_to(label), s.value.apply_to(value));
    }
    let gray = if p.gray {
        s.enabled.apply_to("on")
    } else {
        s.disabled.apply_to("off")
    };
    println!("    {:<12}{}", s.label.apply_to("Grayscale"), gray);
}
