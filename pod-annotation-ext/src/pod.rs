use super::*;

pub trait PodExt {
    /// Value of the annotation `key`, treating a missing map as a missing key.
    fn annotation(&self, key: &str) -> Option<&str>;
    fn containers(&self) -> &[corev1::Container];
    fn containers_mut(&mut self) -> &mut [corev1::Container];
    fn name(&self) -> &str;
}

impl PodExt for corev1::Pod {
    fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .annotations
            .as_ref()?
            .get(key)
            .map(String::as_str)
    }

    fn containers(&self) -> &[corev1::Container] {
        self.spec
            .as_ref()
            .map(|spec| spec.containers.as_slice())
            .unwrap_or_default()
    }

    fn containers_mut(&mut self) -> &mut [corev1::Container] {
        self.spec
            .as_mut()
            .map(|spec| spec.containers.as_mut_slice())
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

pub trait ContainerExt {
    fn new(name: impl ToString) -> Self;
    fn push_env(&mut self, env: corev1::EnvVar);
    fn env(&self) -> &[corev1::EnvVar];
}

impl ContainerExt for corev1::Container {
    fn new(name: impl ToString) -> Self {
        let name = name.to_string();
        Self { name, ..default() }
    }

    fn push_env(&mut self, env: corev1::EnvVar) {
        self.env.get_or_insert_with(Vec::new).push(env);
    }

    fn env(&self) -> &[corev1::EnvVar] {
        self.env.as_deref().unwrap_or_default()
    }
}

pub trait EnvVarExt {
    fn new(name: impl ToString, value: impl ToString) -> Self;
}

impl EnvVarExt for corev1::EnvVar {
    fn new(name: impl ToString, value: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value.to_string()),
            ..default()
        }
    }
}
