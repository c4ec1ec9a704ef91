use tracing::warn;

use crate::multimedia::application::domain::entities::MediaKind;
use crate::multimedia::application::ports::outgoing::MediaStore;

/// Best-effort deletion of remote objects.
///
/// Each object is attempted once; failures are logged and counted, never returned
/// as errors. Returns the number of objects that could not be deleted.
pub async fn discard_remote_objects(store: &dyn MediaStore, objects: &[(String, MediaKind)]) -> usize {
    let mut failures = 0;

    for (remote_id, kind) in objects {
        if !store.delete(remote_id, *kind).await {
            warn!(public_id = %remote_id, kind = %kind, "Remote media object was not deleted");
            failures += 1;
        }
    }

    failures
}
