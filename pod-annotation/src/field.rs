use super::*;

/// Path to the offending field, e.g. `annotations`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(path: impl ToString) -> Self {
        Self(path.to_string())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldErrorType {
    Required,
}

impl FieldErrorType {
    /// Machine readable cause reported in `Status.details.causes[].reason`.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Required => "FieldValueRequired",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Self::Required => "Required value",
        }
    }
}

/// A single field level violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorType,
    pub field: FieldPath,
    pub detail: String,
}

impl FieldError {
    pub fn required(field: FieldPath, detail: impl ToString) -> Self {
        Self::new(FieldErrorType::Required, field, detail)
    }

    fn new(kind: FieldErrorType, field: FieldPath, detail: impl ToString) -> Self {
        let detail = detail.to_string();
        Self {
            kind,
            field,
            detail,
        }
    }

    /// The error without the field path, e.g. `Required value: <detail>`.
    pub fn body(&self) -> String {
        let summary = self.kind.summary();
        if self.detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}: {}", self.detail)
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.body())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrorList(Vec<FieldError>);

impl FieldErrorList {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Turns collected violations into an [`InvalidError`] for the named object.
    ///
    /// An empty list means the object is valid.
    pub fn into_invalid(
        self,
        group_kind: GroupKind,
        name: impl ToString,
    ) -> Result<(), InvalidError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(InvalidError::new(group_kind, name, self))
        }
    }
}

impl fmt::Display for FieldErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => Ok(()),
            [error] => error.fmt(f),
            errors => {
                let errors = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{errors}]")
            }
        }
    }
}

impl FromIterator<FieldError> for FieldErrorList {
    fn from_iter<T: IntoIterator<Item = FieldError>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
