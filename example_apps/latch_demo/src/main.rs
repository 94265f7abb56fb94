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

use std::error::Error;
use std::time::Duration;

use tessera_utilities::latch::{CompletionLatch, TokioScheduler};
use tessera_utilities::nibble::{decode, encode};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::info;
use tracing_subscriber::EnvFilter;

const STAGES: [&str; 3] = ["config", "storage", "network"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::new("")
        .add_directive("tessera_latch=trace".parse()?)
        .add_directive("latch_demo=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (scheduler, worker) = TokioScheduler::new(Handle::current());

    let (done_tx, done_rx) = oneshot::channel();
    let latch = CompletionLatch::new(scheduler, STAGES, move || {
        let _ = done_tx.send(());
    });

    let mut tasks = vec![];
    for (i, stage) in STAGES.into_iter().enumerate() {
        let trigger = latch.trigger(stage);
        tasks.push(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50 * (i as u64 + 1))).await;
            info!(stage = trigger.event(), "Stage finished.");
            trigger.fire()
        }));
    }

    done_rx.await?;
    info!(done = latch.done(), "All stages finished.");
    for task in tasks {
        task.await?;
    }

    let tiles = [3u8, 14, 7, 0, 9];
    let units = encode(tiles);
    println!("{:?} -> {:04X?} -> {:?}", tiles, units, decode(&units));

    drop(latch);
    worker.await?;
    Ok(())
}
