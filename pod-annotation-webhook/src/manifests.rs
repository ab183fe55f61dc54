//! Webhook configurations registering this server with the API server.

use pod_annotation_ext::ObjectMetaExt as _;
use pod_annotation_ext::admissionregistrationv1 as admissionv1;
use pod_annotation_ext::default;

use super::*;

const CA_INJECTION_ANNOTATION: &str = "cert-manager.io/inject-ca-from";
const MUTATING_CONFIGURATION_NAME: &str = "pod-annotation-mutating-webhook-configuration";
const VALIDATING_CONFIGURATION_NAME: &str = "pod-annotation-validating-webhook-configuration";

/// Renders both configurations as a multi-document YAML stream.
pub(crate) fn render(args: &cli::ManifestArgs) -> serde_json::Result<String> {
    let mutating = serde_json::to_string_pretty(&mutating_configuration(args))?;
    let validating = serde_json::to_string_pretty(&validating_configuration(args))?;
    Ok(format!("---\n{mutating}\n---\n{validating}\n"))
}

fn mutating_configuration(args: &cli::ManifestArgs) -> admissionv1::MutatingWebhookConfiguration {
    let webhook = admissionv1::MutatingWebhook {
        admission_review_versions: vec!["v1".to_string()],
        client_config: client_config(args, paths::MUTATE_POD_PATH),
        failure_policy: Some("Fail".to_string()),
        name: paths::MUTATING_WEBHOOK_NAME.to_string(),
        rules: Some(pod_rules()),
        side_effects: "None".to_string(),
        ..default()
    };
    admissionv1::MutatingWebhookConfiguration {
        metadata: metadata(MUTATING_CONFIGURATION_NAME, args),
        webhooks: Some(vec![webhook]),
    }
}

fn validating_configuration(
    args: &cli::ManifestArgs,
) -> admissionv1::ValidatingWebhookConfiguration {
    let webhook = admissionv1::ValidatingWebhook {
        admission_review_versions: vec!["v1".to_string()],
        client_config: client_config(args, paths::VALIDATE_POD_PATH),
        failure_policy: Some("Fail".to_string()),
        name: paths::VALIDATING_WEBHOOK_NAME.to_string(),
        rules: Some(pod_rules()),
        side_effects: "None".to_string(),
        ..default()
    };
    admissionv1::ValidatingWebhookConfiguration {
        metadata: metadata(VALIDATING_CONFIGURATION_NAME, args),
        webhooks: Some(vec![webhook]),
    }
}

fn metadata(name: &str, args: &cli::ManifestArgs) -> metav1::ObjectMeta {
    let meta = metav1::ObjectMeta::new(name);
    match &args.inject_ca_from {
        Some(certificate) => meta.annotated(CA_INJECTION_ANNOTATION, certificate),
        None => meta,
    }
}

fn client_config(args: &cli::ManifestArgs, path: &str) -> admissionv1::WebhookClientConfig {
    let service = admissionv1::ServiceReference {
        name: args.service_name.clone(),
        namespace: args.namespace.clone(),
        path: Some(path.to_string()),
        port: Some(args.port),
    };
    admissionv1::WebhookClientConfig {
        service: Some(service),
        ..default()
    }
}

fn pod_rules() -> Vec<admissionv1::RuleWithOperations> {
    let rule = admissionv1::RuleWithOperations {
        api_groups: Some(vec![<corev1::Pod as k8s::openapi::Resource>::GROUP.to_string()]),
        api_versions: Some(vec![<corev1::Pod as k8s::openapi::Resource>::VERSION.to_string()]),
        operations: Some(vec!["CREATE".to_string(), "UPDATE".to_string()]),
        resources: Some(vec![
            <corev1::Pod as k8s::openapi::Resource>::URL_PATH_SEGMENT.to_string(),
        ]),
        ..default()
    };
    vec![rule]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(inject_ca_from: Option<&str>) -> cli::ManifestArgs {
        cli::ManifestArgs {
            service_name: "webhook-service".to_string(),
            namespace: "system".to_string(),
            port: 443,
            inject_ca_from: inject_ca_from.map(ToString::to_string),
        }
    }

    #[test]
    fn mutating_webhook() {
        let configuration = mutating_configuration(&args(None));
        let webhooks = configuration.webhooks.unwrap();
        let webhook = &webhooks[0];

        assert_eq!(webhooks.len(), 1);
        assert_eq!(webhook.name, "mutate.pod.hitsumabushi845.github.io");
        assert_eq!(webhook.failure_policy.as_deref(), Some("Fail"));
        assert_eq!(webhook.side_effects, "None");
        assert_eq!(webhook.admission_review_versions, ["v1"]);

        let service = webhook.client_config.service.as_ref().unwrap();
        assert_eq!(service.name, "webhook-service");
        assert_eq!(service.namespace, "system");
        assert_eq!(service.path.as_deref(), Some("/mutate--v1-pod"));
        assert_eq!(service.port, Some(443));
        assert!(configuration.metadata.annotations.is_none());
    }

    #[test]
    fn validating_webhook() {
        let configuration = validating_configuration(&args(None));
        let webhook = &configuration.webhooks.unwrap()[0];

        assert_eq!(webhook.name, "validate.pod.hitsumabushi845.github.io");
        let service = webhook.client_config.service.as_ref().unwrap();
        assert_eq!(service.path.as_deref(), Some("/validate--v1-pod"));
    }

    #[test]
    fn rules_cover_pod_create_and_update() {
        let rule = &pod_rules()[0];

        assert_eq!(rule.api_groups.as_deref(), Some(&["".to_string()][..]));
        assert_eq!(rule.api_versions.as_deref(), Some(&["v1".to_string()][..]));
        assert_eq!(rule.resources.as_deref(), Some(&["pods".to_string()][..]));
        assert_eq!(
            rule.operations.as_deref(),
            Some(&["CREATE".to_string(), "UPDATE".to_string()][..])
        );
    }

    #[test]
    fn ca_injection_annotation() {
        let configuration = validating_configuration(&args(Some("system/serving-cert")));
        let annotations = configuration.metadata.annotations.unwrap();

        assert_eq!(
            annotations.get(CA_INJECTION_ANNOTATION).map(String::as_str),
            Some("system/serving-cert")
        );
    }

    #[test]
    fn rendered_stream() {
        let rendered = render(&args(None)).unwrap();
        let documents = rendered
            .split("---\n")
            .filter(|document| !document.trim().is_empty())
            .map(serde_json::from_str::<serde_json::Value>)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["kind"], "MutatingWebhookConfiguration");
        assert_eq!(documents[1]["kind"], "ValidatingWebhookConfiguration");
        assert_eq!(
            documents[0]["apiVersion"],
            "admissionregistration.k8s.io/v1"
        );
    }
}
