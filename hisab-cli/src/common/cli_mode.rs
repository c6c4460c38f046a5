/// Whether a mode handled the invocation or the next mode should be tried.
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
