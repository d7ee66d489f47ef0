use crate::{
    structure::MethodStructure,
    traverse::VisitKinds,
    tree::{ClassMapping, MethodMapping, ParameterMapping},
    validation::{engine::Validator, issues::IssueSink},
    Result,
};

/// Java keywords and literals that cannot be used as identifiers.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null", "_",
];

/// Checks contributed parameter names against Java naming rules and conventions.
///
/// Invalid identifiers and reserved words are errors; a valid name that does not
/// start with a lowercase letter is flagged as a warning only.
#[derive(Debug, Default)]
pub struct NamingValidator;

impl NamingValidator {
    /// Creates the validator.
    pub fn new() -> Self {
        Self
    }
}

impl Validator for NamingValidator {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn kinds(&self) -> VisitKinds {
        VisitKinds::CLASSES | VisitKinds::METHODS | VisitKinds::PARAMETERS
    }

    fn check_parameter(
        &mut self,
        _class: &ClassMapping,
        _method: &MethodMapping,
        param: &ParameterMapping,
        _structure: Option<&MethodStructure>,
        issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        let Some(name) = param.name.as_deref() else {
            return Ok(());
        };

        if name.is_empty() {
            issues.error("parameter name is empty");
        } else if !is_java_identifier(name) {
            issues.error(format!("'{name}' is not a valid Java identifier"));
        } else if RESERVED.contains(&name) {
            issues.error(format!("'{name}' is a reserved word"));
        } else if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
            issues.warning(format!("'{name}' should be lowerCamelCase"));
        }

        Ok(())
    }
}

fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::issues::Severity;

    fn check(name: &str) -> Vec<(Severity, String)> {
        let mut validator = NamingValidator::new();
        let class = ClassMapping::new("a/B");
        let method = MethodMapping::new("run", "(I)V");
        let param = ParameterMapping::new(1).with_name(name);

        let mut issues = Vec::new();
        validator
            .check_parameter(
                &class,
                &method,
                &param,
                None,
                &mut IssueSink::new("naming", &mut issues),
            )
            .unwrap();
        issues
            .into_iter()
            .map(|i| (i.severity, i.message))
            .collect()
    }

    #[test]
    fn good_names_pass() {
        assert!(check("width").is_empty());
        assert!(check("maxRetryCount").is_empty());
        assert!(check("x2").is_empty());
    }

    #[test]
    fn invalid_identifiers_are_errors() {
        assert_eq!(check("9lives")[0].0, Severity::Error);
        assert_eq!(check("has space")[0].0, Severity::Error);
        assert_eq!(check("")[0].0, Severity::Error);
    }

    #[test]
    fn reserved_words_are_errors() {
        assert_eq!(check("class")[0].0, Severity::Error);
        assert_eq!(check("null")[0].0, Severity::Error);
    }

    #[test]
    fn case_convention_is_a_warning() {
        assert_eq!(check("Widget")[0].0, Severity::Warning);
        assert_eq!(check("_temp")[0].0, Severity::Warning);
    }

    #[test]
    fn unnamed_parameters_are_ignored() {
        let mut validator = NamingValidator::new();
        let class = ClassMapping::new("a/B");
        let method = MethodMapping::new("run", "(I)V");
        let param = ParameterMapping::new(1);
        let mut issues = Vec::new();
        validator
            .check_parameter(
                &class,
                &method,
                &param,
                None,
                &mut IssueSink::new("naming", &mut issues),
            )
            .unwrap();
        assert!(issues.is_empty());
    }
}
