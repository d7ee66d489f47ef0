use crate::{
    structure::{ClassStructure, FieldStructure, MethodStructure},
    traverse::{VisitFlow, VisitKinds},
    tree::{ClassMapping, FieldMapping, MethodMapping, PackageMapping, ParameterMapping},
    validation::{engine::Validator, issues::IssueSink},
    Result,
};

/// Checks documentation hygiene on every node category.
///
/// Tabs in documentation are errors (they render unpredictably); trailing
/// whitespace and blank edge lines are warnings. Parameter docs additionally must
/// not be present-but-empty.
#[derive(Debug, Default)]
pub struct DocValidator;

impl DocValidator {
    /// Creates the validator.
    pub fn new() -> Self {
        Self
    }

    fn check_lines(docs: &[String], issues: &mut IssueSink<'_>) {
        for (number, line) in docs.iter().enumerate() {
            Self::check_line(line, number, issues);
        }
        if docs.first().is_some_and(|l| l.trim().is_empty()) {
            issues.warning("documentation starts with a blank line");
        }
        if docs.len() > 1 && docs.last().is_some_and(|l| l.trim().is_empty()) {
            issues.warning("documentation ends with a blank line");
        }
    }

    fn check_line(line: &str, number: usize, issues: &mut IssueSink<'_>) {
        if line.contains('\t') {
            issues.error(format!("documentation line {number} contains a tab"));
        }
        if line != line.trim_end() {
            issues.warning(format!(
                "documentation line {number} has trailing whitespace"
            ));
        }
    }
}

impl Validator for DocValidator {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn kinds(&self) -> VisitKinds {
        VisitKinds::all()
    }

    fn check_package(
        &mut self,
        package: &PackageMapping,
        issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        Self::check_lines(&package.docs, issues);
        Ok(())
    }

    fn check_class(
        &mut self,
        class: &ClassMapping,
        _structure: Option<&ClassStructure>,
        issues: &mut IssueSink<'_>,
    ) -> Result<VisitFlow> {
        Self::check_lines(&class.docs, issues);
        Ok(VisitFlow::Descend)
    }

    fn check_field(
        &mut self,
        _class: &ClassMapping,
        field: &FieldMapping,
        _structure: Option<&FieldStructure>,
        issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        Self::check_lines(&field.docs, issues);
        Ok(())
    }

    fn check_method(
        &mut self,
        _class: &ClassMapping,
        method: &MethodMapping,
        _structure: Option<&MethodStructure>,
        issues: &mut IssueSink<'_>,
    ) -> Result<VisitFlow> {
        Self::check_lines(&method.docs, issues);
        Ok(VisitFlow::Descend)
    }

    fn check_parameter(
        &mut self,
        _class: &ClassMapping,
        _method: &MethodMapping,
        param: &ParameterMapping,
        _structure: Option<&MethodStructure>,
        issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        if let Some(doc) = param.doc.as_deref() {
            if doc.is_empty() {
                issues.warning("parameter documentation is present but empty");
            } else {
                Self::check_line(doc, 0, issues);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::issues::{Issue, Severity};

    fn check(docs: &[&str]) -> Vec<Issue> {
        let mut issues = Vec::new();
        let docs: Vec<String> = docs.iter().map(|s| s.to_string()).collect();
        DocValidator::check_lines(&docs, &mut IssueSink::new("docs", &mut issues));
        issues
    }

    #[test]
    fn clean_docs_pass() {
        assert!(check(&["A widget.", "", "Resizable."]).is_empty());
        assert!(check(&[]).is_empty());
    }

    #[test]
    fn tabs_are_errors() {
        let issues = check(&["uses\ttabs"]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn trailing_whitespace_is_a_warning() {
        let issues = check(&["padded  "]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn blank_edge_lines_are_warnings() {
        assert_eq!(check(&["", "body"]).len(), 1);
        assert_eq!(check(&["body", ""]).len(), 1);
        // A single blank line is only reported once, as a leading blank.
        assert_eq!(check(&[""]).len(), 1);
    }

    #[test]
    fn empty_parameter_doc_is_a_warning() {
        let mut validator = DocValidator::new();
        let class = ClassMapping::new("a/B");
        let method = MethodMapping::new("run", "(I)V");
        let param = ParameterMapping::new(1).with_doc("");
        let mut issues = Vec::new();
        validator
            .check_parameter(
                &class,
                &method,
                &param,
                None,
                &mut IssueSink::new("docs", &mut issues),
            )
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
