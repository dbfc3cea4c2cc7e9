// handlers/mod.rs - HTTP controllers
//
// Each handler parses its request, calls one service method and maps the
// result (or ServiceError) onto a status code and JSON body.

pub mod auth;   // POST /api/login, POST /api/signup
pub mod health; // GET /health, GET /api/test
pub mod todos;  // GET/POST /api/todos, DELETE /api/todos/:id
