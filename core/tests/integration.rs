//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every
//! `FishClient` build/parse pair over real HTTP using ureq as the host.

use fish_core::{ApiError, CreateFish, FishClient, HttpMethod, HttpRequest, HttpResponse, UpdateFish};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

#[test]
fn crud_lifecycle() {
    // Step 1: start mock server (seeded) on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            fish_mock_server::run(listener).await
        })
        .unwrap();
    });

    let client = FishClient::new(&format!("http://{addr}"));

    // Step 2: list — the three seeded records.
    let fish = client.parse_list_fish(execute(client.build_list_fish())).unwrap();
    assert_eq!(fish.len(), 3);

    // Step 3: create.
    let input = CreateFish {
        name: "Gill".to_string(),
        species: "Moorish Idol".to_string(),
        length_in_cm: 15.0,
        weight_in_kg: 0.3,
    };
    let req = client.build_create_fish(&input).unwrap();
    let created = client.parse_create_fish(execute(req)).unwrap();
    assert_eq!(created.id, "4");
    assert_eq!(created.name, "Gill");

    // Step 4: get the created fish.
    let fetched = client
        .parse_get_fish(execute(client.build_get_fish(&created.id)))
        .unwrap();
    assert_eq!(fetched, created);

    // Step 5: partial update.
    let update = UpdateFish {
        name: Some("Nemo Jr.".to_string()),
        ..UpdateFish::default()
    };
    let req = client.build_update_fish("1", &update).unwrap();
    let updated = client.parse_update_fish(execute(req)).unwrap();
    assert_eq!(updated.name, "Nemo Jr.");
    assert_eq!(updated.species, "Clownfish");

    // Step 6: update unknown id — NotFound.
    let req = client.build_update_fish("99", &update).unwrap();
    let err = client.parse_update_fish(execute(req)).unwrap_err();
    assert_eq!(err, ApiError::NotFound);

    // Step 7: delete.
    client
        .parse_delete_fish(execute(client.build_delete_fish("2")))
        .unwrap();

    // Step 8: get after delete — NotFound.
    let err = client
        .parse_get_fish(execute(client.build_get_fish("2")))
        .unwrap_err();
    assert_eq!(err, ApiError::NotFound);

    // Step 9: delete again — still 204.
    client
        .parse_delete_fish(execute(client.build_delete_fish("2")))
        .unwrap();

    // Step 10: list — 1, 3, 4.
    let ids: Vec<_> = client
        .parse_list_fish(execute(client.build_list_fish()))
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(ids, ["1", "3", "4"]);
}
