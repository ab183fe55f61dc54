use super::*;

/// Kind of an object qualified with its group, rendered as `Kind.group`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl GroupKind {
    pub fn new(group: impl ToString, kind: impl ToString) -> Self {
        let group = group.to_string();
        let kind = kind.to_string();
        Self { group, kind }
    }

    /// Group-kind rejected Pods are reported under.
    pub fn pod() -> Self {
        Self::new("core.v1", "Pod")
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// An object failed validation with one or more field errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{group_kind} {name:?} is invalid: {causes}")]
pub struct InvalidError {
    group_kind: GroupKind,
    name: String,
    causes: FieldErrorList,
}

impl InvalidError {
    pub fn new(group_kind: GroupKind, name: impl ToString, causes: FieldErrorList) -> Self {
        let name = name.to_string();
        Self {
            group_kind,
            name,
            causes,
        }
    }

    pub fn group_kind(&self) -> &GroupKind {
        &self.group_kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn causes(&self) -> &FieldErrorList {
        &self.causes
    }
}
