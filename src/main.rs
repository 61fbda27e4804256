mod input;
mod log;
mod page;
mod scheduler;
mod time;
mod viewport;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use input::{key_input, pixel_to_cell, wheel_delta_px, ClickState, InputEvent};
use page::content::Portfolio;
use page::PortfolioPage;
use ratzilla::event::{MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Query the grid container's bounding rect and convert a pointer position
/// to a grid cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.cols)?;
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.rows)?;
    Some((col, row))
}

/// Forward `wheel` events on the window to the page as pixel deltas.
fn install_wheel_listener(page: Rc<RefCell<PortfolioPage>>) {
    let Some(window) = web_sys::window() else {
        log::warn("no window; wheel scrolling disabled");
        return;
    };
    let on_wheel = Closure::<dyn FnMut(web_sys::WheelEvent)>::new(move |e: web_sys::WheelEvent| {
        let mut page = page.borrow_mut();
        let page_height = page.viewport().viewport_height_px();
        let delta = wheel_delta_px(e.delta_y(), e.delta_mode(), page_height);
        page.handle_input(&InputEvent::Wheel(delta));
    });
    if window
        .add_event_listener_with_callback("wheel", on_wheel.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn("could not attach wheel listener");
    }
    // Lives as long as the page
    on_wheel.forget();
}

/// Attach `listener` for `event` on the window for the life of the page.
fn listen_on_window(event: &str, listener: Closure<dyn FnMut(web_sys::PageTransitionEvent)>) {
    let attached = web_sys::window().is_some_and(|w| {
        w.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            .is_ok()
    });
    if !attached {
        log::warn(&format!("could not attach {event} listener"));
    }
    listener.forget();
}

/// Tear the page down on `pagehide` so no timer fires into a hidden page,
/// and mount it again when the back/forward cache restores it.
fn install_lifecycle_listeners(page: Rc<RefCell<PortfolioPage>>) {
    listen_on_window(
        "pagehide",
        Closure::new({
            let page = page.clone();
            move |_: web_sys::PageTransitionEvent| page.borrow_mut().unmount()
        }),
    );
    listen_on_window(
        "pageshow",
        Closure::new(move |e: web_sys::PageTransitionEvent| {
            if e.persisted() {
                page.borrow_mut().mount();
            }
        }),
    );
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let portfolio =
        Portfolio::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let year = js_sys::Date::new_0().get_full_year() as i32;

    let page = Rc::new(RefCell::new(PortfolioPage::new(portfolio, year)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    page.borrow_mut().mount();
    install_wheel_listener(page.clone());
    install_lifecycle_listeners(page.clone());

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let page = page.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.is_blank() {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(id) = action {
                page.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let page = page.clone();
        move |key_event| {
            if let Some(event) = key_input(key_event.code, key_event.shift) {
                page.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            let mut cs = click_state.borrow_mut();
            cs.reset(size.width, size.height);

            let mut page = page.borrow_mut();
            page.frame(time::performance_now(), size.width, size.height);
            page.render(f, &mut cs);
        }
    });

    Ok(())
}
