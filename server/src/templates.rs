use tera::{Context, Tera};

use crate::error::AppError;

/// Compile the bundled page templates. `.html` names are autoescaped.
pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("list.html", include_str!("../templates/list.html")),
        ("form.html", include_str!("../templates/form.html")),
        ("confirm_delete.html", include_str!("../templates/confirm_delete.html")),
        ("admin_changelist.html", include_str!("../templates/admin_changelist.html")),
    ])?;
    Ok(tera)
}

pub fn render(tera: &Tera, name: &str, context: &Context) -> Result<String, AppError> {
    Ok(tera.render(name, context)?)
}
