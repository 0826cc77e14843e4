use anyhow::Result;
use bizboost_core::{classify as classify_path, resolve_color_audited};
use bizboost_model::{ColorResolution, TemplateId};

pub fn classify(path: &str) -> Result<()> {
    match classify_path(path) {
        Some(template) => println!("{template}"),
        None => println!("none"),
    }
    Ok(())
}

pub fn resolve(color: &str, audit: bool) -> Result<()> {
    let resolution = resolve_color_audited(color);
    println!("{}", resolution.token());
    if audit && let ColorResolution::Coerced { original, .. } = &resolution {
        println!("coerced from {original:?}");
    }
    Ok(())
}

pub fn templates() -> Result<()> {
    for template in TemplateId::ALL {
        let colors = template.default_colors();
        println!(
            "{:<11} {:<13} {:<12} {}/{}",
            template.as_str(),
            template.display_name(),
            template.base_path(),
            colors.primary,
            colors.secondary,
        );
    }
    Ok(())
}
