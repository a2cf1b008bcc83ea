// One module per output mode
pub mod host;
pub mod inventory;
pub mod list;

#[cfg(test)]
pub(crate) mod fixtures {
    use tfstate::State;

    /// Two web instances, one database and a data source, with outputs.
    pub const STATE: &str = r#"{
        "version": 4,
        "outputs": {
            "aws_instance_web_port": { "value": 8080 },
            "region": { "value": "eu-west-1" }
        },
        "resources": [
            {
                "mode": "managed",
                "type": "aws_instance",
                "name": "web",
                "instances": [
                    {
                        "index_key": 1,
                        "attributes": {
                            "id": "i-web1",
                            "availability_zone": "eu-west-1b",
                            "tags": { "ansible_group": "frontend", "Role": "web" }
                        }
                    },
                    {
                        "index_key": 0,
                        "attributes": {
                            "id": "i-web0",
                            "availability_zone": "eu-west-1a",
                            "tags": { "ansible_group": "frontend", "Role": "web" }
                        }
                    }
                ]
            },
            {
                "mode": "managed",
                "type": "aws_db_instance",
                "name": "db",
                "instances": [
                    { "attributes": { "id": "db-1", "tags": { "backup": "" } } }
                ]
            },
            {
                "mode": "data",
                "type": "aws_ami",
                "name": "ubuntu",
                "instances": [{ "attributes": { "id": "ami-1" } }]
            }
        ]
    }"#;

    pub fn state() -> State {
        State::from_json(STATE).unwrap()
    }
}
