use fibre_injector::{class, injectable, Arguments, Injectable, Injector, Lazy, Parameter, Result};
use std::sync::Arc;

// `EventBus` and `Auditor` need each other. The bus takes the auditor lazily.
struct EventBus {
  auditor: Lazy<Auditor>,
}

impl Injectable for EventBus {
  fn parameters() -> Vec<Parameter> {
    vec![Parameter::of::<Auditor>().lazy()]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(EventBus {
      auditor: args.next_lazy()?,
    })
  }
}

impl EventBus {
  fn publish(&self, event: &str) -> Result<()> {
    self.auditor.get()?.record(event);
    Ok(())
  }
}

struct Auditor {
  _bus: Arc<EventBus>,
}
injectable!(Auditor { _bus: EventBus });

impl Auditor {
  fn record(&self, event: &str) {
    println!("audit: {}", event);
  }
}

fn main() -> Result<()> {
  let injector = Injector::new([class::<EventBus>(), class::<Auditor>()])?;

  let bus = injector.get_type::<EventBus>()?;
  println!("Auditor built yet? {}", bus.auditor.is_resolved());

  bus.publish("user.created")?;
  println!("Auditor built yet? {}", bus.auditor.is_resolved());

  drop(injector);
  // The bus and its resolved auditor keep working without the injector.
  bus.publish("user.deleted")?;
  Ok(())
}
