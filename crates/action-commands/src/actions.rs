use tracing::{trace, warn};

use crate::command::{Directive, Params};
use crate::error::Result;
use crate::sink::{CommandSink, StdoutSink};
use crate::value::Value;

/// Workflow command emitter bound to one output sink.
///
/// Every call renders exactly one line. Calls are independent; the only
/// relationship between them is the nesting of groups, which is not checked.
#[derive(Debug, Default, Clone)]
pub struct Actions<S: CommandSink = StdoutSink> {
    sink: S,
}

impl Actions<StdoutSink> {
    pub fn stdout() -> Self {
        Self { sink: StdoutSink }
    }
}

impl<S: CommandSink> Actions<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn emit<V: Into<Value>>(
        &self,
        name: Option<&str>,
        params: Option<&Params>,
        value: V,
    ) -> Result<()> {
        let directive = Directive {
            name: name.map(str::to_string),
            params: params.cloned().unwrap_or_default(),
            value: value.into(),
        };
        self.emit_directive(&directive)
    }

    pub fn emit_directive(&self, directive: &Directive) -> Result<()> {
        trace!(command = directive.name(), "emitting workflow command");
        self.sink.write_line(&directive.render())
    }

    fn simple<V: Into<Value>>(&self, name: &str, value: V) -> Result<()> {
        self.emit_directive(&Directive::new(name).value(value))
    }

    fn named<V: Into<Value>>(&self, command: &str, name: &str, value: V) -> Result<()> {
        self.emit_directive(&Directive::new(command).param("name", name).value(value))
    }

    pub fn debug(&self, message: &str) -> Result<()> {
        self.simple("debug", message)
    }

    /// Plain log line, written verbatim without a command wrapper.
    pub fn info(&self, message: &str) -> Result<()> {
        self.sink.write_line(message)
    }

    pub fn warning(&self, message: &str) -> Result<()> {
        self.simple("warning", message)
    }

    pub fn error(&self, message: &str) -> Result<()> {
        self.simple("error", message)
    }

    pub fn set_output<V: Into<Value>>(&self, name: &str, value: V) -> Result<()> {
        self.named("set-output", name, value)
    }

    /// Hand a value to a later step of the same action; read back with
    /// [`crate::env::get_state`].
    pub fn save_state<V: Into<Value>>(&self, name: &str, value: V) -> Result<()> {
        self.named("save-state", name, value)
    }

    pub fn set_command_echo(&self, enabled: bool) -> Result<()> {
        self.simple("echo", if enabled { "on" } else { "off" })
    }

    pub fn add_mask(&self, secret: &str) -> Result<()> {
        self.simple("add-mask", secret)
    }

    /// Stop command processing until `resume_commands` is called with the same token.
    pub fn stop_commands(&self, token: &str) -> Result<()> {
        self.simple("stop-commands", token)
    }

    pub fn resume_commands(&self, token: &str) -> Result<()> {
        self.emit_directive(&Directive::new(token))
    }

    /// Open a group. The returned guard closes it when dropped.
    pub fn begin_group(&self, title: &str) -> Result<GroupGuard<'_, S>> {
        self.simple("group", title)?;
        Ok(GroupGuard {
            actions: self,
            open: true,
        })
    }

    fn end_group(&self) -> Result<()> {
        self.emit_directive(&Directive::new("endgroup"))
    }

    /// Run `f` inside a group. The end marker is written on every exit path,
    /// including a panic inside `f`.
    pub fn group<R, F: FnOnce() -> R>(&self, title: &str, f: F) -> Result<R> {
        let guard = self.begin_group(title)?;
        let out = f();
        guard.end()?;
        Ok(out)
    }

    /// Report `message` as an error and exit with status 1.
    pub fn set_failed(&self, message: &str) -> ! {
        self.set_failed_with(message, 1)
    }

    /// Like [`Actions::set_failed`], exiting with `code` (0 is bumped to 1).
    pub fn set_failed_with(&self, message: &str, code: i32) -> ! {
        if let Err(e) = self.error(message) {
            warn!("failed to write error command: {e}");
            eprintln!("{message}");
        }
        std::process::exit(if code == 0 { 1 } else { code })
    }
}

/// Open `::group::` section; writes `::endgroup::` exactly once.
#[must_use = "dropping the guard immediately closes the group"]
pub struct GroupGuard<'a, S: CommandSink> {
    actions: &'a Actions<S>,
    open: bool,
}

impl<S: CommandSink> GroupGuard<'_, S> {
    /// Close the group now and report a failed write.
    pub fn end(mut self) -> Result<()> {
        self.open = false;
        self.actions.end_group()
    }
}

impl<S: CommandSink> Drop for GroupGuard<'_, S> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = self.actions.end_group() {
            warn!("failed to close group: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;
    use crate::sink::MemorySink;

    fn actions() -> Actions<MemorySink> {
        Actions::new(MemorySink::new())
    }

    #[test]
    fn levels() {
        let a = actions();
        a.debug("d").unwrap();
        a.info("plain: text, kept").unwrap();
        a.warning("w").unwrap();
        a.error("e").unwrap();
        assert_eq!(
            a.sink().take(),
            vec!["::debug::d", "plain: text, kept", "::warning::w", "::error::e"]
        );
    }

    #[test]
    fn multiline_error_stays_on_one_line() {
        let a = actions();
        a.error("first\nsecond 100%").unwrap();
        assert_eq!(a.sink().take(), vec!["::error::first%0Asecond 100%25"]);
    }

    #[test]
    fn outputs_and_state() {
        let a = actions();
        a.set_output("rpm-dir", "RPMS").unwrap();
        a.save_state("image", "sdk:4.5, latest").unwrap();
        assert_eq!(
            a.sink().take(),
            vec!["::set-output name=rpm-dir::RPMS", "::save-state name=image::sdk:4.5, latest"]
        );
    }

    #[test]
    fn echo_mask_and_stop_commands() {
        let a = actions();
        a.set_command_echo(true).unwrap();
        a.set_command_echo(false).unwrap();
        a.add_mask("s3cr3t").unwrap();
        a.stop_commands("tok").unwrap();
        a.resume_commands("tok").unwrap();
        assert_eq!(
            a.sink().take(),
            vec![
                "::echo::on",
                "::echo::off",
                "::add-mask::s3cr3t",
                "::stop-commands::tok",
                "::tok::"
            ]
        );
    }

    #[test]
    fn group_wraps_block() {
        let a = actions();
        let n = a
            .group("Build", || {
                a.info("building").unwrap();
                7
            })
            .unwrap();
        assert_eq!(n, 7);
        assert_eq!(a.sink().take(), vec!["::group::Build", "building", "::endgroup::"]);
    }

    #[test]
    fn group_closes_on_early_error() {
        let a = actions();
        let res: Result<std::result::Result<(), String>> =
            a.group("Fails", || Err("boom".to_string()));
        assert_eq!(res.unwrap(), Err("boom".to_string()));
        assert_eq!(a.sink().take(), vec!["::group::Fails", "::endgroup::"]);
    }

    #[test]
    fn group_closes_on_panic() {
        let a = actions();
        let caught = catch_unwind(AssertUnwindSafe(|| {
            let _ = a.group("Panics", || -> u8 { panic!("boom") });
        }));
        assert!(caught.is_err());
        assert_eq!(a.sink().take(), vec!["::group::Panics", "::endgroup::"]);
    }

    #[test]
    fn guard_ends_once() {
        let a = actions();
        {
            let outer = a.begin_group("outer").unwrap();
            {
                let _inner = a.begin_group("inner").unwrap();
            }
            outer.end().unwrap();
        }
        assert_eq!(
            a.sink().take(),
            vec!["::group::outer", "::group::inner", "::endgroup::", "::endgroup::"]
        );
    }
}
