// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use super::{Scheduler, Task};

/// A [`Scheduler`] backed by a tokio runtime.
///
/// Tasks on the normal lane are sent to a single worker task which runs them one at a time, in the
/// order in which they were scheduled. Tasks on the fast lane bypass that queue and are spawned
/// directly onto the runtime so, on a multi-threaded runtime, they may run concurrently with the
/// normal lane.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
    normal_tx: mpsc::UnboundedSender<Task>,
}

impl TokioScheduler {
    /// Create a scheduler that runs its tasks on the runtime referred to by `handle`. The returned
    /// [`JoinHandle`] belongs to the normal lane worker which will stop once every clone of the
    /// scheduler has been dropped and the remaining queued tasks have run.
    pub fn new(handle: Handle) -> (Self, JoinHandle<()>) {
        let (normal_tx, mut normal_rx) = mpsc::unbounded_channel::<Task>();
        let worker = handle.spawn(async move {
            while let Some(task) = normal_rx.recv().await {
                task();
            }
        });
        (TokioScheduler { handle, normal_tx }, worker)
    }
}

impl Scheduler for TokioScheduler {
    fn run_task(&self, task: Task) {
        if self.normal_tx.send(task).is_err() {
            warn!("The normal lane worker has stopped. A task was dropped.");
        }
    }

    fn run_task_fast(&self, task: Task) {
        self.handle.spawn(async move { task() });
    }
}
