use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use time::{
    format_description::{self, FormatItem},
    OffsetDateTime, UtcOffset,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{format, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
    FmtSubscriber,
};

/// Initialize the logging system
pub fn init_logging(level: Level) -> Result<()> {
    let local_offset = UtcOffset::current_local_offset()
        .into_diagnostic()
        .wrap_err("Could not get current local time offset")?;

    let subscriber = FmtSubscriber::builder()
        .event_format(LineFormat::new(local_offset))
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .into_diagnostic()
        .wrap_err("Setting default subscriber failed")
}

/// One line per event: local time, level, emitting thread, message.
///
/// The thread name is part of the format because the trim workers run as
/// named threads and interleave their progress lines.
struct LineFormat {
    offset: UtcOffset,
    time_format: Vec<FormatItem<'static>>,
}

impl LineFormat {
    fn new(offset: UtcOffset) -> Self {
        Self {
            offset,
            time_format: format_description::parse("[hour]:[minute]:[second]").unwrap(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let now = OffsetDateTime::now_utc().to_offset(self.offset).time();
        let time = now.format(&self.time_format).map_err(|_| std::fmt::Error)?;

        let level = *event.metadata().level();
        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("?");

        if writer.has_ansi_escapes() {
            let level = match level {
                Level::ERROR => level.red().to_string(),
                Level::WARN => level.yellow().to_string(),
                Level::DEBUG | Level::TRACE => level.blue().to_string(),
                _ => level.green().to_string(),
            };
            write!(&mut writer, "{time} {level:>5} [{}] ", thread_name.cyan())?;
        } else {
            write!(&mut writer, "{time} {level:>5} [{thread_name}] ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
