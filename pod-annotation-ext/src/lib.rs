pub use k8s_openapi as openapi;
pub use k8s_openapi::api::admissionregistration::v1 as admissionregistrationv1;
pub use k8s_openapi::api::core::v1 as corev1;
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;

pub use pod::ContainerExt;
pub use pod::EnvVarExt;
pub use pod::PodExt;

use kube::core::Status;
use kube::core::response::{StatusCause, StatusDetails, reason};
use pod_annotation::InvalidError;

mod pod;

pub trait ObjectMetaExt {
    fn new(name: impl ToString) -> Self;
    fn with_namespace(name: impl ToString, namespace: impl ToString) -> Self;
    fn annotated(self, key: impl ToString, value: impl ToString) -> Self;
}

impl ObjectMetaExt for metav1::ObjectMeta {
    fn new(name: impl ToString) -> Self {
        let name = Some(name.to_string());
        Self { name, ..default() }
    }

    fn with_namespace(name: impl ToString, namespace: impl ToString) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            ..Self::new(name)
        }
    }

    fn annotated(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.annotations
            .get_or_insert_with(default)
            .insert(key.to_string(), value.to_string());
        self
    }
}

pub trait StatusExt {
    fn invalid(err: &InvalidError) -> Self;
}

impl StatusExt for Status {
    /// Failure status with HTTP code 422 and one cause per field error.
    fn invalid(err: &InvalidError) -> Self {
        let group_kind = err.group_kind();
        let causes = err
            .causes()
            .iter()
            .map(|cause| StatusCause {
                reason: cause.kind.reason().to_string(),
                message: cause.body(),
                field: cause.field.to_string(),
            })
            .collect();
        let details = StatusDetails {
            name: err.name().to_string(),
            group: group_kind.group.clone(),
            kind: group_kind.kind.clone(),
            uid: String::new(),
            causes,
            retry_after_seconds: 0,
        };
        Self::failure(&err.to_string(), reason::INVALID)
            .with_code(422)
            .with_details(details)
    }
}

pub fn default<T: Default>() -> T {
    T::default()
}
