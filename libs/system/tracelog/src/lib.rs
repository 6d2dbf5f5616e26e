// This file is part of Nitrogen.
//
// Nitrogen is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Nitrogen is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Nitrogen.  If not, see <http://www.gnu.org/licenses/>.
use anyhow::Result;
use runtime::{Extension, Runtime};
use structopt::StructOpt;
use tracing_subscriber::{
    fmt::{format::DefaultFields, FormattedFields},
    prelude::*,
    registry::Registry,
};

// Inspired heavily by bevy_log

#[derive(Clone, Debug, StructOpt)]
pub struct TraceLogOpts {
    /// Capture a chrome-format execution trace.
    #[structopt(short = "T", long)]
    trace: bool,
}

/// Marker resource: presence means a `tracing` subscriber is installed.
#[derive(Debug)]
pub struct TraceLog;

impl Extension for TraceLog {
    fn init(runtime: &mut Runtime) -> Result<()> {
        let Some(opts) = runtime.get_resource::<TraceLogOpts>() else {
            return Ok(());
        };
        if !opts.trace {
            return Ok(());
        }

        let subscriber = Registry::default();
        let subscriber = subscriber.with(tracing_error::ErrorLayer::default());
        let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
            .name_fn(Box::new(|event_or_span| match event_or_span {
                tracing_chrome::EventOrSpan::Event(event) => event.metadata().name().into(),
                tracing_chrome::EventOrSpan::Span(span) => {
                    if let Some(fields) = span.extensions().get::<FormattedFields<DefaultFields>>() {
                        format!("{}: {}", span.metadata().name(), fields.fields.as_str())
                    } else {
                        span.metadata().name().into()
                    }
                }
            }))
            .build();
        // The guard must outlive the process to keep flushing the trace;
        // there is no non-Send resource slot in this runtime to park it in.
        Box::leak(Box::new(guard));

        let fmt_layer = tracing_subscriber::fmt::Layer::default();
        let subscriber = subscriber.with(fmt_layer).with(chrome_layer);
        tracing::subscriber::set_global_default(subscriber)
            .expect("could not install the global tracing subscriber (one is already set)");

        runtime.insert_resource(TraceLog);
        Ok(())
    }
}
