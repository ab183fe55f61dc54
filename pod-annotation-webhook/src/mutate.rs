use super::*;

pub(crate) async fn handler<K, P>(
    State(policy): State<Arc<P>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>>
where
    K: k8s::openapi::Resource + Clone + Serialize + DeserializeOwned + Send + 'static,
    P: CustomDefaulter<K> + Send + Sync + 'static,
{
    Json(mutate_review::<K, P>(&policy, review))
}

/// Runs the defaulter against the submitted object and answers with a JSON patch.
pub(crate) fn mutate_review<K, P>(
    policy: &P,
    review: AdmissionReview<DynamicObject>,
) -> AdmissionReview<DynamicObject>
where
    K: k8s::openapi::Resource + Clone + Serialize + DeserializeOwned,
    P: CustomDefaulter<K>,
{
    let request = match TypedRequest::<K>::try_from_review(review) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!(%err, "Rejecting malformed admission review");
            return AdmissionResponse::invalid(err).into_review();
        }
    };

    let uid = request.uid();
    let name = request.name();
    let operation = request.operation();
    let response = request.response();

    let response = match (operation, &request.object) {
        (Operation::Create | Operation::Update, Some(object)) => {
            match default_object(policy, object) {
                Ok(Some(patch)) => {
                    tracing::info!(uid, name, ?operation, ops = patch.0.len(), "Defaulted object");
                    response.with_patch(patch).unwrap_or_else(|err| {
                        tracing::error!(uid, %err, "Failed to serialize patch");
                        request.response().deny(WebhookError::from(err))
                    })
                }
                Ok(None) => response,
                Err(err) => {
                    tracing::error!(uid, %err, "Failed to default object");
                    response.deny(err)
                }
            }
        }
        (Operation::Create | Operation::Update, None) => {
            tracing::warn!(uid, ?operation, "Admission request has no object");
            response.deny("admission request has no object")
        }
        (operation, _) => {
            tracing::debug!(uid, ?operation, "Nothing to default");
            response
        }
    };

    response.into_review()
}

/// Returns the patch turning `original` into its defaulted form, if anything changed.
fn default_object<K, P>(policy: &P, original: &K) -> Result<Option<json_patch::Patch>, WebhookError>
where
    K: Clone + Serialize,
    P: CustomDefaulter<K>,
{
    let mut object = original.clone();
    if !policy.default(&mut object).is_mutated() {
        return Ok(None);
    }

    let before = serde_json::to_value(original).map_err(WebhookError::Encode)?;
    let after = serde_json::to_value(&object).map_err(WebhookError::Encode)?;
    let patch = json_patch::diff(&before, &after);

    Ok((!patch.0.is_empty()).then_some(patch))
}
