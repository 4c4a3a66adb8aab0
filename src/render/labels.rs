//! Built-in section and field labels.

/// `(id, English, Spanish)`.
const BUILTIN: &[(&str, &str, &str)] = &[
    ("education", "Education", "Educación"),
    ("awards", "Awards", "Premios"),
    ("languages", "Languages", "Idiomas"),
    ("technical-skills", "Technical Skills", "Habilidades técnicas"),
    ("dev-technologies", "Technologies", "Tecnologías"),
    ("techniques", "Techniques", "Técnicas"),
    ("skills", "Skills", "Habilidades"),
    ("coursework", "Coursework", "Cursos"),
    ("teaching", "Teaching", "Docencia"),
    ("design", "Design Portfolio", "Portafolio de diseño"),
    ("admin-skills", "Administrative Skills", "Habilidades administrativas"),
    ("publications", "Publications", "Publicaciones"),
    ("philosophy", "Philosophy", "Filosofía"),
    ("preferred-role", "Preferred Role", "Rol preferido"),
    ("source", "Source", "Fuente"),
    ("updated", "Last updated", "Última actualización"),
    ("gpa", "GPA", "Promedio"),
];

/// Look up a built-in label. Only `en` and `es` ship with labels.
pub fn builtin_label(id: &str, locale: &str) -> Option<&'static str> {
    let &(_, en, es) = BUILTIN.iter().find(|(key, _, _)| *key == id)?;
    match locale {
        "en" => Some(en),
        "es" => Some(es),
        _ => None,
    }
}

/// `babel` language option for a locale tag, if known.
pub fn babel_language(locale: &str) -> Option<&'static str> {
    let lang = locale.split(['-', '_']).next().unwrap_or(locale);
    match lang {
        "en" => Some("english"),
        "es" => Some("spanish"),
        "pt" => Some("portuguese"),
        "fr" => Some("french"),
        "de" => Some("ngerman"),
        "it" => Some("italian"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_label() {
        assert_eq!(builtin_label("education", "en"), Some("Education"));
        assert_eq!(builtin_label("education", "es"), Some("Educación"));
        assert_eq!(builtin_label("education", "fr"), None);
        assert_eq!(builtin_label("hobbies", "en"), None);
    }

    #[test]
    fn test_babel_language() {
        assert_eq!(babel_language("es"), Some("spanish"));
        assert_eq!(babel_language("pt-BR"), Some("portuguese"));
        assert_eq!(babel_language("xx"), None);
    }
}
