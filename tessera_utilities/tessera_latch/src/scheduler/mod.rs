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

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use static_assertions::assert_obj_safe;

mod runtime;

pub use runtime::TokioScheduler;


/// A unit of work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// The dispatch disciplines offered by a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Queued behind previously scheduled tasks and run in order.
    Normal,
    /// Run with as little queuing delay as the scheduler can manage.
    Fast,
}

/// Capability for running callbacks on behalf of a [`crate::CompletionLatch`]. Each task that is
/// passed to a scheduler must eventually be run exactly once.
pub trait Scheduler {
    /// Queue a task on the normal lane.
    fn run_task(&self, task: Task);

    /// Dispatch a task on the fast lane.
    fn run_task_fast(&self, task: Task);

    /// Dispatch a task on the specified lane.
    fn dispatch(&self, lane: Lane, task: Task) {
        match lane {
            Lane::Normal => self.run_task(task),
            Lane::Fast => self.run_task_fast(task),
        }
    }
}

assert_obj_safe!(Scheduler);

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn run_task(&self, task: Task) {
        (**self).run_task(task)
    }

    fn run_task_fast(&self, task: Task) {
        (**self).run_task_fast(task)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn run_task(&self, task: Task) {
        (**self).run_task(task)
    }

    fn run_task_fast(&self, task: Task) {
        (**self).run_task_fast(task)
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn run_task(&self, task: Task) {
        (**self).run_task(task)
    }

    fn run_task_fast(&self, task: Task) {
        (**self).run_task_fast(task)
    }
}

#[derive(Default)]
struct Queues {
    fast: VecDeque<Task>,
    normal: VecDeque<Task>,
}

impl Queues {
    fn next(&mut self) -> Option<Task> {
        self.fast.pop_front().or_else(|| self.normal.pop_front())
    }
}

/// A cooperative scheduler that only runs tasks when it is explicitly asked to. Both lanes are
/// FIFO queues and the fast lane is always drained first.
#[derive(Default)]
pub struct ManualScheduler {
    queues: Mutex<Queues>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Default::default()
    }

    /// Run queued tasks until both lanes are empty, returning the number of tasks that were run.
    /// Tasks that schedule further tasks on this scheduler will have those run too.
    pub fn run_pending(&self) -> usize {
        let mut count = 0;
        // The lock must not be held while a task runs as it may schedule more work.
        while let Some(task) = self.next_task() {
            task();
            count += 1;
        }
        count
    }

    fn next_task(&self) -> Option<Task> {
        self.queues.lock().next()
    }

    /// The number of tasks waiting on the fast lane.
    pub fn pending_fast(&self) -> usize {
        self.queues.lock().fast.len()
    }

    /// The number of tasks waiting on the normal lane.
    pub fn pending_normal(&self) -> usize {
        self.queues.lock().normal.len()
    }

    /// Whether there are no tasks waiting on either lane.
    pub fn is_idle(&self) -> bool {
        let guard = self.queues.lock();
        guard.fast.is_empty() && guard.normal.is_empty()
    }
}

impl Scheduler for ManualScheduler {
    fn run_task(&self, task: Task) {
        self.queues.lock().normal.push_back(task);
    }

    fn run_task_fast(&self, task: Task) {
        self.queues.lock().fast.push_back(task);
    }
}
