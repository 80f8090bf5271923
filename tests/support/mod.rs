#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use serde_json::json;
use tiny_http::{Header, Response, Server};

/// Minimal GL debug server answering the endpoints the client uses.
pub struct MockServer {
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<String>>>,
    handle: Option<JoinHandle<()>>,
    url: String,
}

impl MockServer {
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let srv = Arc::clone(&server);
        let seen = Arc::clone(&requests);
        let handle = std::thread::spawn(move || {
            for req in srv.incoming_requests() {
                let url = req.url().to_string();
                let path = url.split('?').next().unwrap_or_default().to_string();
                seen.lock().unwrap().push(url);
                let _ = req.respond(route(&path));
            }
        });

        Self {
            server,
            requests,
            handle: Some(handle),
            url: format!("http://{addr}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request URLs received so far, including query strings.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|u| u.split('?').next() == Some(path))
            .count()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

pub fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap()
}

fn json_response(body: serde_json::Value) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(body.to_string().into_bytes())
        .with_header(header("Content-Type", "application/json"))
}

fn png_response(bytes: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(bytes).with_header(header("Content-Type", "image/png"))
}

fn status(code: u16) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(b"error".to_vec()).with_status_code(code)
}

fn route(path: &str) -> Response<Cursor<Vec<u8>>> {
    match path {
        "/debug/begin" | "/debug/play" | "/debug/nextFrame" | "/debug/nextGroup"
        | "/debug/nextFbo" | "/debug/nextDraw" | "/debug/next" => Response::from_data(b"ok".to_vec()),
        "/log/-100" => json_response(json!({ "log": ["glClear(COLOR)", "glDrawArrays(TRIANGLES, 0, 3)"] })),
        "/log/-2" => json_response(json!({ "log": ["glDrawArrays(TRIANGLES, 0, 3)"] })),
        "/fbo/0/color0" => png_response(png(100, 50, [255, 0, 0, 255])),
        "/texture" => json_response(json!(["checker", 7])),
        "/texture/checker" => json_response(json!({
            "target": "GL_TEXTURE_2D",
            "GL_TEXTURE_MAG_FILTER": "GL_NEAREST",
            "GL_TEXTURE_MIN_FILTER": "GL_LINEAR",
            "levels": [{ "width": 2, "height": 2, "internalFormat": "GL_RGBA" }]
        })),
        "/texture/checker/image" => png_response(png(2, 2, [0, 0, 255, 255])),
        "/texture/7" => json_response(json!({ "GL_TEXTURE_MAG_FILTER": "GL_LINEAR" })),
        "/texture/7/image" => png_response(b"not a png".to_vec()),
        "/program" => json_response(json!(["3"])),
        "/program/3" => json_response(json!({
            "linkStatus": true,
            "attachedShaders": ["1", "2"],
            "uniforms": { "u_color": { "type": "vec4", "location": 0 } },
            "infoLog": null
        })),
        "/shader" => status(500),
        "/shader/1" => Response::from_data(b"{ not json".to_vec()),
        _ => status(404),
    }
}
