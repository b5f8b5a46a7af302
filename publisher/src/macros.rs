#[macro_export]
macro_rules! listener {
    ($handler:ident.$method:ident) => {
        $crate::Listener::new({
            let handler = $handler.clone(); // Clone the handler
            move |id, value| {
                handler.$method(id, value); // Call the method on the handler
            }
        })
    };
}
