use super::*;

/// Admission request whose objects were decoded into `K`.
///
/// The request is rejected before decoding when it was issued for another kind.
#[derive(Debug)]
pub(crate) struct TypedRequest<K> {
    pub(crate) request: AdmissionRequest<DynamicObject>,
    pub(crate) object: Option<K>,
    pub(crate) old_object: Option<K>,
}

impl<K> TypedRequest<K>
where
    K: k8s::openapi::Resource + DeserializeOwned,
{
    pub(crate) fn try_from_review(
        review: AdmissionReview<DynamicObject>,
    ) -> Result<Self, WebhookError> {
        let mut request: AdmissionRequest<DynamicObject> = review.try_into()?;

        let kind = &request.kind;
        if kind.group != K::GROUP || kind.version != K::VERSION || kind.kind != K::KIND {
            return Err(WebhookError::KindMismatch {
                expected: gvk(K::GROUP, K::VERSION, K::KIND),
                actual: gvk(&kind.group, &kind.version, &kind.kind),
            });
        }

        let object = request.object.take().map(decode::<K>).transpose()?;
        let old_object = request.old_object.take().map(decode::<K>).transpose()?;

        Ok(Self {
            request,
            object,
            old_object,
        })
    }

    pub(crate) fn uid(&self) -> &str {
        &self.request.uid
    }

    pub(crate) fn operation(&self) -> &Operation {
        &self.request.operation
    }

    pub(crate) fn name(&self) -> &str {
        &self.request.name
    }

    pub(crate) fn response(&self) -> AdmissionResponse {
        AdmissionResponse::from(&self.request)
    }
}

fn decode<K>(object: DynamicObject) -> Result<K, WebhookError>
where
    K: k8s::openapi::Resource + DeserializeOwned,
{
    serde_json::to_value(object)
        .and_then(serde_json::from_value)
        .map_err(|source| WebhookError::Decode {
            kind: K::KIND,
            source,
        })
}

fn gvk(group: &str, version: &str, kind: &str) -> String {
    format!("{group}/{version}, Kind={kind}")
}

#[cfg(test)]
mod tests {
    use crate::tests::{UID, pod, review};

    use super::*;

    #[test]
    fn decodes_pod_objects() {
        let review = review("UPDATE", Some(pod("demo", None)), Some(pod("demo", None)));
        let typed = TypedRequest::<corev1::Pod>::try_from_review(review).unwrap();

        assert_eq!(typed.operation(), &Operation::Update);
        assert_eq!(typed.uid(), UID);
        assert_eq!(typed.name(), "demo");
        assert!(typed.object.is_some());
        assert!(typed.old_object.is_some());
    }

    #[test]
    fn rejects_other_kinds() {
        let mut review = review("CREATE", Some(pod("demo", None)), None);
        if let Some(request) = review.request.as_mut() {
            request.kind.group = "apps".to_string();
            request.kind.kind = "Deployment".to_string();
        }

        let err = TypedRequest::<corev1::Pod>::try_from_review(review).unwrap_err();

        assert!(matches!(err, WebhookError::KindMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "expected /v1, Kind=Pod object, got apps/v1, Kind=Deployment"
        );
    }

    #[test]
    fn rejects_undecodable_object() {
        let mut object = pod("demo", None);
        object["spec"]["containers"] = serde_json::json!("not-a-list");
        let review = review("CREATE", Some(object), None);

        let err = TypedRequest::<corev1::Pod>::try_from_review(review).unwrap_err();

        assert!(matches!(err, WebhookError::Decode { kind: "Pod", .. }));
    }

    #[test]
    fn rejects_review_without_request() {
        let mut review = review("CREATE", None, None);
        review.request = None;

        let err = TypedRequest::<corev1::Pod>::try_from_review(review).unwrap_err();

        assert!(matches!(err, WebhookError::MissingRequest(_)));
    }
}
