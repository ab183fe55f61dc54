use kube::core::Status;

use super::*;

pub(crate) trait AdmissionResponseExt {
    /// Denies the request, reporting `status` to the caller.
    fn reject(self, status: Status) -> Self;
}

impl AdmissionResponseExt for AdmissionResponse {
    fn reject(self, status: Status) -> Self {
        let mut response = self.deny(&status.message);
        response.result = status;
        response
    }
}
