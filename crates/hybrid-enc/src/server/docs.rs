//! The OpenAPI document served at `GET /api-docs`.
//!
//! The document is authored as a JSON literal and parsed through
//! [`openapiv3::OpenAPI`] at startup, so a malformed document fails the boot
//! rather than surfacing as garbage to consumers.

use anyhow::{Context, Result};
use openapiv3::OpenAPI;
use serde_json::json;

/// Build the typed OpenAPI document for this service.
///
/// # Errors
///
/// Returns an error if the authored document does not parse as OpenAPI 3 —
/// a programming error caught at startup.
pub fn api_document() -> Result<OpenAPI> {
    let doc = json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Hybrid Encryption",
            "description": "The API description of hybrid encryption",
            "version": "1.0"
        },
        "paths": {
            "/get-encrypt-data": {
                "post": {
                    "summary": "Encrypt a payload",
                    "description": "Encrypts the payload under a one-time AES-256-GCM key and returns the wrapped key (data1) and the ciphertext envelope (data2).",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/EncryptRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Encryption successful",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/EncryptEnvelope" }
                                }
                            }
                        },
                        "400": {
                            "description": "Encryption bad request",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ErrorEnvelope" }
                                }
                            }
                        },
                        "500": {
                            "description": "Encryption internal server error",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ErrorEnvelope" }
                                }
                            }
                        }
                    }
                }
            },
            "/get-decrypt-data": {
                "post": {
                    "summary": "Decrypt a payload",
                    "description": "Recovers the one-time key from data1 with the configured public key, then verifies and decrypts the envelope in data2.",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/DecryptRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Decryption successful",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/DecryptEnvelope" }
                                }
                            }
                        },
                        "400": {
                            "description": "Decryption bad request",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ErrorEnvelope" }
                                }
                            }
                        },
                        "500": {
                            "description": "Decryption internal server error",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ErrorEnvelope" }
                                }
                            }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Service health",
                    "responses": {
                        "200": { "description": "Service is ready" },
                        "503": { "description": "No key material is configured" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "EncryptRequest": {
                    "type": "object",
                    "required": ["payload"],
                    "additionalProperties": false,
                    "properties": {
                        "payload": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": 2000
                        }
                    }
                },
                "DecryptRequest": {
                    "type": "object",
                    "required": ["data1", "data2"],
                    "additionalProperties": false,
                    "properties": {
                        "data1": { "type": "string", "description": "Base64 key envelope" },
                        "data2": { "type": "string", "description": "ciphertext:nonce:tag, each segment base64" }
                    }
                },
                "EncryptEnvelope": {
                    "type": "object",
                    "properties": {
                        "successful": { "type": "boolean" },
                        "error_code": { "type": "string" },
                        "data": {
                            "type": "object",
                            "nullable": true,
                            "properties": {
                                "data1": { "type": "string" },
                                "data2": { "type": "string" }
                            }
                        }
                    }
                },
                "DecryptEnvelope": {
                    "type": "object",
                    "properties": {
                        "successful": { "type": "boolean" },
                        "error_code": { "type": "string" },
                        "data": {
                            "type": "object",
                            "nullable": true,
                            "properties": {
                                "payload": { "type": "string" }
                            }
                        }
                    }
                },
                "ErrorEnvelope": {
                    "type": "object",
                    "properties": {
                        "successful": { "type": "boolean", "example": false },
                        "error_code": { "type": "string" },
                        "data": { "nullable": true, "example": null }
                    }
                }
            }
        }
    });

    serde_json::from_value(doc).context("generated OpenAPI document is invalid")
}
