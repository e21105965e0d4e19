// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Signing algorithm name, the prefix of the authorization header.
pub const EG1_HMAC_SHA256: &str = "EG1-HMAC-SHA256";

/// Number of body bytes covered by the content hash unless configured otherwise.
pub const DEFAULT_MAX_BODY: usize = 131072;

// Env values used by EdgeGrid clients.
pub const AKAMAI_CLIENT_TOKEN: &str = "AKAMAI_CLIENT_TOKEN";
pub const AKAMAI_ACCESS_TOKEN: &str = "AKAMAI_ACCESS_TOKEN";
pub const AKAMAI_CLIENT_SECRET: &str = "AKAMAI_CLIENT_SECRET";
pub const AKAMAI_BASEURL: &str = "AKAMAI_BASEURL";
pub const AKAMAI_MAX_BODY: &str = "AKAMAI_MAX_BODY";
pub const AKAMAI_EDGERC: &str = "AKAMAI_EDGERC";
pub const AKAMAI_EDGERC_SECTION: &str = "AKAMAI_EDGERC_SECTION";

// .edgerc defaults and keys.
pub const DEFAULT_EDGERC_PATH: &str = "~/.edgerc";
pub const DEFAULT_EDGERC_SECTION: &str = "default";
pub const EDGERC_CLIENT_TOKEN: &str = "client_token";
pub const EDGERC_ACCESS_TOKEN: &str = "access_token";
pub const EDGERC_CLIENT_SECRET: &str = "client_secret";
pub const EDGERC_HOST: &str = "host";
pub const EDGERC_MAX_BODY: &str = "max-body";
