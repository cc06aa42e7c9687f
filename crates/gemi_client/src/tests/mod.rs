mod http_backend;
