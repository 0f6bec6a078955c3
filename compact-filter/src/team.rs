//! Join point shared by the compute and merge phases.

use std::io;
use std::thread::ScopedJoinHandle;

use crate::CompactError;

/// Join every spawned worker, then report the first failure.
///
/// All handles are joined even when one worker panicked or a later spawn
/// failed, so the enclosing scope never re-raises a worker panic.
pub(crate) fn join_team<'scope, R>(
    handles: Vec<(usize, ScopedJoinHandle<'scope, R>)>,
    spawn_error: Option<io::Error>,
) -> Result<Vec<R>, CompactError> {
    let mut results = Vec::with_capacity(handles.len());
    let mut panicked = None;

    for (chunk, handle) in handles {
        match handle.join() {
            Ok(result) => results.push(result),
            Err(_) => {
                log::error!("worker for chunk {} panicked", chunk);
                panicked.get_or_insert(chunk);
            }
        }
    }

    if let Some(err) = spawn_error {
        return Err(CompactError::Spawn(err));
    }
    if let Some(chunk) = panicked {
        return Err(CompactError::WorkerPanicked { chunk });
    }
    Ok(results)
}
