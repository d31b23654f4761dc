
use listen_once::*;

fn main() {

    simple_logger::init_with_level(LogLevel::Trace).unwrap();

    let ready = Value::new(false);

    // fires once, on the first change to true
    ready.attach(OnceListener::when_true(|_, _, _| log::info!("ready")));

    // fires on every change until detached
    let watcher = ready.attach_fn(|_, old, new| log::info!("changed {old:?} -> {new:?}"));

    ready.set(false); // watcher only
    ready.set(true);  // fires the one-time listener, which detaches itself
    ready.set(true);  // watcher only

    ready.detach(watcher);
    ready.set(false); // nobody left
}
