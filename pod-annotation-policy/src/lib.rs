use pod_annotation::{
    ANNOTATION_KEY, ANNOTATION_REQUIRED_MESSAGE, FieldError, FieldErrorList, FieldPath,
    GroupKind, InvalidError, SAMPLE_ENV,
};
use pod_annotation_ext as k8s;

use k8s::ContainerExt as _;
use k8s::EnvVarExt as _;
use k8s::PodExt as _;
use k8s::corev1;

/// Mutates an object before it is persisted.
///
/// Defaulting never fails, it either changes the object or leaves it alone.
pub trait CustomDefaulter<K> {
    fn default(&self, obj: &mut K) -> Defaulted;
}

/// Accepts or rejects an object for each admission operation.
pub trait CustomValidator<K> {
    fn validate_create(&self, obj: &K) -> Result<(), InvalidError>;
    fn validate_update(&self, old: &K, new: &K) -> Result<(), InvalidError>;
    fn validate_delete(&self, obj: &K) -> Result<(), InvalidError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Defaulted {
    Mutated,
    Unchanged(SkipReason),
}

impl Defaulted {
    pub fn is_mutated(&self) -> bool {
        matches!(self, Self::Mutated)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoAnnotations,
    AnnotationNotFound,
    NoContainers,
    MultipleContainers(usize),
}

/// Defaults and validates Pods carrying the sample annotation.
///
/// Every decision is logged inside the span the policy was built with.
#[derive(Clone, Debug)]
pub struct PodAdmissionPolicy {
    span: tracing::Span,
}

impl PodAdmissionPolicy {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("pod-resource"))
    }

    pub fn with_span(span: tracing::Span) -> Self {
        Self { span }
    }

    pub fn validate_annotation(&self, pod: &corev1::Pod) -> Result<(), InvalidError> {
        let _entered = self.span.enter();
        let mut errors = FieldErrorList::default();

        if pod.annotation(ANNOTATION_KEY).is_none() {
            errors.push(FieldError::required(
                FieldPath::new("annotations"),
                ANNOTATION_REQUIRED_MESSAGE,
            ));
        }

        let name = pod.name();
        errors
            .into_invalid(GroupKind::pod(), name)
            .inspect_err(|err| tracing::error!(%err, name, "validation error"))
    }
}

impl Default for PodAdmissionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomDefaulter<corev1::Pod> for PodAdmissionPolicy {
    fn default(&self, pod: &mut corev1::Pod) -> Defaulted {
        let _entered = self.span.enter();

        if pod.metadata.annotations.is_none() {
            return Defaulted::Unchanged(SkipReason::NoAnnotations);
        }

        let Some(value) = pod.annotation(ANNOTATION_KEY).map(ToString::to_string) else {
            tracing::info!("Annotation not found. Skip defaulting.");
            return Defaulted::Unchanged(SkipReason::AnnotationNotFound);
        };
        tracing::info!(value = %value, "Annotation found");

        match pod.containers_mut() {
            [] => {
                tracing::warn!("No containers found. Skip defaulting.");
                Defaulted::Unchanged(SkipReason::NoContainers)
            }
            [container] => {
                container.push_env(corev1::EnvVar::new(SAMPLE_ENV, value));
                Defaulted::Mutated
            }
            containers => {
                let count = containers.len();
                tracing::info!(count, "Multiple containers found. Skip defaulting.");
                Defaulted::Unchanged(SkipReason::MultipleContainers(count))
            }
        }
    }
}

impl CustomValidator<corev1::Pod> for PodAdmissionPolicy {
    fn validate_create(&self, pod: &corev1::Pod) -> Result<(), InvalidError> {
        self.validate_annotation(pod)
    }

    fn validate_update(&self, _old: &corev1::Pod, new: &corev1::Pod) -> Result<(), InvalidError> {
        self.validate_annotation(new)
    }

    fn validate_delete(&self, _pod: &corev1::Pod) -> Result<(), InvalidError> {
        Ok(())
    }
}
