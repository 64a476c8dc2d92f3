mod api;
mod attachments;
mod catalog;
mod config;
mod error;
mod landing;
mod logging;
mod model;
mod payment;
mod registration;
mod route;
mod views;

fn main() {
    logging::init();
    yew::Renderer::<views::app::App>::new().render();
}
