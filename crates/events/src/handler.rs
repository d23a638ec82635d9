use sitedesk_core::Aggregate;

/// Run one command against an in-memory aggregate.
///
/// The aggregate decides first and only then applies what it decided, so a
/// refused command returns its error with the aggregate unchanged.
pub fn execute<A: Aggregate>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error> {
    let events = aggregate.handle(command)?;
    events.iter().for_each(|event| aggregate.apply(event));
    Ok(events)
}
