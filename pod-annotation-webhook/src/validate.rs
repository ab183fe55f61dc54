use pod_annotation_ext::StatusExt as _;

use crate::ext::AdmissionResponseExt as _;

use super::*;

pub(crate) async fn handler<K, P>(
    State(policy): State<Arc<P>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>>
where
    K: k8s::openapi::Resource + DeserializeOwned + Send + 'static,
    P: CustomValidator<K> + Send + Sync + 'static,
{
    Json(validate_review::<K, P>(&policy, review))
}

pub(crate) fn validate_review<K, P>(
    policy: &P,
    review: AdmissionReview<DynamicObject>,
) -> AdmissionReview<DynamicObject>
where
    K: k8s::openapi::Resource + DeserializeOwned,
    P: CustomValidator<K>,
{
    let request = match TypedRequest::<K>::try_from_review(review) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!(%err, "Rejecting malformed admission review");
            return AdmissionResponse::invalid(err).into_review();
        }
    };

    let uid = request.uid();
    let operation = request.operation();
    let object = request.object.as_ref();
    let old_object = request.old_object.as_ref();

    let verdict = match (operation, object, old_object) {
        (Operation::Create, Some(object), _) => Some(policy.validate_create(object)),
        (Operation::Update, Some(new), Some(old)) => Some(policy.validate_update(old, new)),
        (Operation::Delete, _, Some(old)) => Some(policy.validate_delete(old)),
        (Operation::Delete | Operation::Connect, _, _) => Some(Ok(())),
        _ => None,
    };

    let response = request.response();
    let response = match verdict {
        Some(Ok(())) => {
            tracing::debug!(uid, ?operation, name = request.name(), "Admission request allowed");
            response
        }
        Some(Err(err)) => {
            tracing::info!(uid, ?operation, %err, "Admission request denied");
            response.reject(kube::core::Status::invalid(&err))
        }
        None => {
            tracing::warn!(uid, ?operation, "Admission request is missing an object");
            response.deny("admission request is missing an object")
        }
    };

    response.into_review()
}

#[cfg(test)]
mod tests {
    use pod_annotation::ANNOTATION_REQUIRED_MESSAGE;

    use crate::tests::{UID, pod, review};

    use super::*;

    fn validate(review: AdmissionReview<DynamicObject>) -> AdmissionResponse {
        let policy = PodAdmissionPolicy::new();
        validate_review::<corev1::Pod, _>(&policy, review)
            .response
            .unwrap()
    }

    #[test]
    fn create_with_annotation_is_allowed() {
        let response = validate(review("CREATE", Some(pod("demo", Some("foo"))), None));

        assert!(response.allowed);
        assert_eq!(response.uid, UID);
    }

    #[test]
    fn create_without_annotation_is_denied() {
        let response = validate(review("CREATE", Some(pod("demo", None)), None));

        assert!(!response.allowed);
        assert_eq!(response.uid, UID);
        assert_eq!(
            response.result.message,
            r#"Pod.core.v1 "demo" is invalid: annotations: Required value: Annotation hitsumabushi845.github.io/sample-annotation must be defined."#
        );
        assert_eq!(response.result.reason, "Invalid");
        assert_eq!(response.result.code, 422);
    }

    #[test]
    fn denial_carries_field_cause() {
        let response = validate(review("CREATE", Some(pod("demo", None)), None));
        let status = serde_json::to_value(&response).unwrap()["status"].clone();

        assert_eq!(status["details"]["kind"], "Pod");
        assert_eq!(status["details"]["group"], "core.v1");
        assert_eq!(status["details"]["name"], "demo");
        let cause = &status["details"]["causes"][0];
        assert_eq!(cause["field"], "annotations");
        assert_eq!(cause["reason"], "FieldValueRequired");
        assert_eq!(
            cause["message"],
            format!("Required value: {ANNOTATION_REQUIRED_MESSAGE}")
        );
    }

    #[test]
    fn update_checks_new_object() {
        let with = pod("demo", Some("foo"));
        let without = pod("demo", None);

        assert!(validate(review("UPDATE", Some(with.clone()), Some(without.clone()))).allowed);
        assert!(!validate(review("UPDATE", Some(without), Some(with))).allowed);
    }

    #[test]
    fn update_without_old_object_is_denied() {
        let response = validate(review("UPDATE", Some(pod("demo", Some("foo"))), None));

        assert!(!response.allowed);
        assert_eq!(response.result.message, "admission request is missing an object");
    }

    #[test]
    fn delete_is_always_allowed() {
        assert!(validate(review("DELETE", None, Some(pod("demo", None)))).allowed);
        assert!(validate(review("DELETE", None, None)).allowed);
    }

    #[test]
    fn connect_is_allowed() {
        assert!(validate(review("CONNECT", None, None)).allowed);
    }
}
